//! Backend entry-point: wires REST endpoints, health probes, and OpenAPI docs.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use zertify_backend::api::health::{live, ready, HealthState};
use zertify_backend::domain::ports::StaticAuthenticator;
use zertify_backend::inbound::http::auth::login;
use zertify_backend::inbound::http::equipment::{add_equipment, list_equipment};
use zertify_backend::inbound::http::import::bulk_import;
use zertify_backend::inbound::http::locations::{add_location, list_locations};
use zertify_backend::inbound::http::{json_error_handler, state::HttpState};
use zertify_backend::outbound::blob::{BlobConfig, HttpSnapshotStore};
use zertify_backend::outbound::persistence::{
    SnapshotBulkImporter, SnapshotEquipment, SnapshotLocations, SnapshotPersistence,
};
#[cfg(debug_assertions)]
use zertify_backend::ApiDoc;

const SNAPSHOT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let connection_string = env::var("AZURE_STORAGE_CONNECTION_STRING").map_err(|_| {
        std::io::Error::other(
            "AZURE_STORAGE_CONNECTION_STRING is not set in the environment variables",
        )
    })?;
    let container = env::var("STORAGE_CONTAINER").unwrap_or_else(|_| "images".into());
    let blob = env::var("STORAGE_BLOB").unwrap_or_else(|_| "zertify.db".into());
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());
    let username = env::var("API_USERNAME").unwrap_or_else(|_| "admin".into());
    let password = env::var("API_PASSWORD").unwrap_or_else(|_| "password".into());

    let blob_config = BlobConfig::from_connection_string(&connection_string, container, blob)
        .map_err(std::io::Error::other)?;
    let store = HttpSnapshotStore::new(&blob_config, SNAPSHOT_REQUEST_TIMEOUT)
        .map_err(std::io::Error::other)?;
    let persistence = SnapshotPersistence::new(Arc::new(store));

    // First boot: create and persist the empty schema when no snapshot
    // exists. A fetch failure here is fatal; see SnapshotPersistence.
    persistence
        .ensure_initialised()
        .await
        .map_err(std::io::Error::other)?;

    let state = web::Data::new(HttpState::new(
        Arc::new(SnapshotLocations::new(persistence.clone())),
        Arc::new(SnapshotEquipment::new(persistence.clone())),
        Arc::new(SnapshotBulkImporter::new(persistence)),
        Arc::new(StaticAuthenticator::new(username, password)),
    ));
    let health_state = web::Data::new(HealthState::new());
    // Clones for the server factory so the probe state stays shared.
    let server_state = state.clone();
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        let api = web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .service(list_locations)
            .service(add_location)
            .service(list_equipment)
            .service(add_equipment)
            .service(login)
            .service(bulk_import);

        let app = App::new()
            .app_data(server_state.clone())
            .app_data(server_health_state.clone())
            .service(api)
            .service(ready)
            .service(live);

        #[cfg(debug_assertions)]
        let app = app.service(
            SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );

        app
    })
    .bind(bind_addr)?;

    health_state.mark_ready();
    server.run().await
}
