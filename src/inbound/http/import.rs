//! Bulk-import API handler.
//!
//! ```text
//! POST /api/bulk-import  (multipart/form-data, field "file" = SQLite .db)
//! ```
//!
//! The handler owns upload plumbing only: locating the `file` part, the
//! filename checks, and buffering the bytes. Validation of the database
//! content and the merge itself live behind the
//! [`crate::domain::ports::BulkImporter`] port.

use actix_multipart::{Multipart, MultipartError};
use actix_web::{post, web, HttpResponse};
use futures_util::TryStreamExt;
use serde_json::json;
use tracing::info;

use crate::domain::Error;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Merge an uploaded snapshot file into the live store.
#[utoipa::path(
    post,
    path = "/api/bulk-import",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Per-table import counts"),
        (status = 400, description = "Missing file, wrong extension, or missing table", body = Error),
        (status = 500, description = "Merge or persistence failure", body = Error)
    ),
    tags = ["import"],
    operation_id = "bulkImport"
)]
#[post("/bulk-import")]
pub async fn bulk_import(
    state: web::Data<HttpState>,
    payload: Multipart,
) -> ApiResult<HttpResponse> {
    let upload = read_upload(payload).await?;
    let summary = state.importer.import(upload).await?;
    info!(message = %summary.message(), "bulk import merged");
    Ok(HttpResponse::Ok().json(json!({
        "message": summary.message(),
        "counts": summary.counts,
    })))
}

/// Extract the `file` part, enforcing the filename contract.
async fn read_upload(mut payload: Multipart) -> Result<Vec<u8>, Error> {
    while let Some(mut field) = payload.try_next().await.map_err(map_multipart_error)? {
        if field.name() != Some("file") {
            // Drain unrelated parts so the stream can advance.
            while field
                .try_next()
                .await
                .map_err(map_multipart_error)?
                .is_some()
            {}
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|disposition| disposition.get_filename())
            .map(str::to_owned)
            .unwrap_or_default();
        if filename.is_empty() {
            return Err(Error::invalid_request("No selected file"));
        }
        if !filename.ends_with(".db") {
            return Err(Error::invalid_request(
                "Invalid file type. Please upload a SQLite database file",
            ));
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(map_multipart_error)? {
            bytes.extend_from_slice(&chunk);
        }
        return Ok(bytes);
    }
    Err(Error::invalid_request("No file part"))
}

fn map_multipart_error(err: MultipartError) -> Error {
    Error::invalid_request(format!("malformed multipart payload: {err}"))
}
