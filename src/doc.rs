//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct that generates the OpenAPI specification for
//! the REST API: all business endpoints, the health probes, and the shared
//! error envelope. The generated specification backs Swagger UI in debug
//! builds.

use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Zertify asset backend API",
        description = "CRUD access to Locations and Equipment over a snapshot-backed store."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::locations::list_locations,
        crate::inbound::http::locations::add_location,
        crate::inbound::http::equipment::list_equipment,
        crate::inbound::http::equipment::add_equipment,
        crate::inbound::http::auth::login,
        crate::inbound::http::import::bulk_import,
        crate::api::health::ready,
        crate::api::health::live,
    ),
    components(schemas(
        crate::domain::Location,
        crate::domain::Equipment,
        crate::domain::Error,
        crate::domain::ErrorCode,
        crate::domain::ImportSummary,
        crate::domain::TableImportCount,
        crate::inbound::http::auth::LoginRequest,
    ))
)]
pub struct ApiDoc;
