//! Equipment API handlers.
//!
//! ```text
//! GET /api/equipment
//! POST /api/equipment {"equipmentId":42,"type":"vehicle",...}
//! ```

use actix_web::{get, post, web, HttpResponse};
use serde_json::json;

use crate::domain::{Equipment, Error};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// List every Equipment record.
#[utoipa::path(
    get,
    path = "/api/equipment",
    responses(
        (status = 200, description = "Equipment in store order", body = [Equipment]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["equipment"],
    operation_id = "listEquipment"
)]
#[get("/equipment")]
pub async fn list_equipment(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Equipment>>> {
    Ok(web::Json(state.equipment.list().await?))
}

/// Insert a new Equipment record with a client-assigned id.
#[utoipa::path(
    post,
    path = "/api/equipment",
    request_body = Equipment,
    responses(
        (status = 201, description = "Equipment added"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Equipment id already exists", body = Error),
        (status = 500, description = "Persistence failure", body = Error)
    ),
    tags = ["equipment"],
    operation_id = "addEquipment"
)]
#[post("/equipment")]
pub async fn add_equipment(
    state: web::Data<HttpState>,
    payload: web::Json<Equipment>,
) -> ApiResult<HttpResponse> {
    state.equipment.add(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(json!({ "message": "Equipment added successfully" })))
}
