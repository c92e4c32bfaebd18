//! Login API handler.
//!
//! ```text
//! POST /api/login {"username":"admin","password":"password"}
//! ```
//!
//! No session is established; the endpoint only reports whether the supplied
//! pair matches the configured constants.

use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::Error;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Login request body for `POST /api/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Check credentials against the configured authenticator.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner();
    if state.auth.verify(&request.username, &request.password) {
        Ok(HttpResponse::Ok().json(json!({ "message": "Login successful" })))
    } else {
        Err(Error::unauthorized("Invalid credentials"))
    }
}
