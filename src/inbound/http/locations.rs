//! Location API handlers.
//!
//! ```text
//! GET /api/locations
//! POST /api/locations {"locationId":1,"name":"Depot",...}
//! ```

use actix_web::{get, post, web, HttpResponse};
use serde_json::json;

use crate::domain::{Error, Location};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// List every Location.
#[utoipa::path(
    get,
    path = "/api/locations",
    responses(
        (status = 200, description = "Locations in store order", body = [Location]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["locations"],
    operation_id = "listLocations"
)]
#[get("/locations")]
pub async fn list_locations(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Location>>> {
    Ok(web::Json(state.locations.list().await?))
}

/// Insert a new Location with a client-assigned id.
#[utoipa::path(
    post,
    path = "/api/locations",
    request_body = Location,
    responses(
        (status = 201, description = "Location added"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Location id already exists", body = Error),
        (status = 500, description = "Persistence failure", body = Error)
    ),
    tags = ["locations"],
    operation_id = "addLocation"
)]
#[post("/locations")]
pub async fn add_location(
    state: web::Data<HttpState>,
    payload: web::Json<Location>,
) -> ApiResult<HttpResponse> {
    state.locations.add(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(json!({ "message": "Location added successfully" })))
}
