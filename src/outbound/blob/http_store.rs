//! HTTP adapter for the snapshot blob, speaking the Azure Blob REST surface.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use thiserror::Error;
use tracing::debug;

use crate::domain::ports::{SnapshotStore, SnapshotStoreError};

const BLOB_API_VERSION: &str = "2021-08-06";
const DEFAULT_ENDPOINT_PROTOCOL: &str = "https";

/// Failures while reading the storage connection string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlobConfigError {
    #[error("connection string is missing the '{field}' field")]
    MissingField { field: &'static str },
    #[error("connection string endpoint is invalid: {message}")]
    InvalidEndpoint { message: String },
}

/// Location of the snapshot blob, parsed from a storage connection string.
///
/// Supports the SAS forms of the connection string: either an explicit
/// `BlobEndpoint` or an `AccountName`/`EndpointSuffix` pair, combined with a
/// `SharedAccessSignature`. Account-key signing is not implemented; supplying
/// a key-only connection string is a configuration error.
#[derive(Debug, Clone)]
pub struct BlobConfig {
    endpoint: Url,
    sas_token: String,
    container: String,
    blob: String,
}

impl BlobConfig {
    /// Parse a connection string and attach the fixed container/blob pair.
    pub fn from_connection_string(
        raw: &str,
        container: impl Into<String>,
        blob: impl Into<String>,
    ) -> Result<Self, BlobConfigError> {
        let mut endpoint = None;
        let mut account = None;
        let mut suffix = None;
        let mut protocol = None;
        let mut sas = None;

        for pair in raw.split(';').filter(|pair| !pair.trim().is_empty()) {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            match key.trim() {
                "BlobEndpoint" => endpoint = Some(value.trim().to_owned()),
                "AccountName" => account = Some(value.trim().to_owned()),
                "EndpointSuffix" => suffix = Some(value.trim().to_owned()),
                "DefaultEndpointsProtocol" => protocol = Some(value.trim().to_owned()),
                // SAS tokens contain '=' themselves, so take the remainder.
                "SharedAccessSignature" => sas = Some(value.trim().trim_start_matches('?').to_owned()),
                _ => {}
            }
        }

        let endpoint = match (endpoint, account) {
            (Some(endpoint), _) => endpoint,
            (None, Some(account)) => {
                let suffix = suffix.unwrap_or_else(|| "core.windows.net".to_owned());
                let protocol =
                    protocol.unwrap_or_else(|| DEFAULT_ENDPOINT_PROTOCOL.to_owned());
                format!("{protocol}://{account}.blob.{suffix}")
            }
            (None, None) => {
                return Err(BlobConfigError::MissingField {
                    field: "BlobEndpoint",
                })
            }
        };
        let endpoint =
            Url::parse(&endpoint).map_err(|err| BlobConfigError::InvalidEndpoint {
                message: err.to_string(),
            })?;
        let sas_token = sas.ok_or(BlobConfigError::MissingField {
            field: "SharedAccessSignature",
        })?;

        Ok(Self {
            endpoint,
            sas_token,
            container: container.into(),
            blob: blob.into(),
        })
    }

    /// Full URL of the snapshot blob, SAS query included.
    fn blob_url(&self) -> Result<Url, BlobConfigError> {
        let base = self.endpoint.as_str().trim_end_matches('/');
        let raw = format!(
            "{base}/{}/{}?{}",
            self.container, self.blob, self.sas_token
        );
        Url::parse(&raw).map_err(|err| BlobConfigError::InvalidEndpoint {
            message: err.to_string(),
        })
    }
}

/// Snapshot store adapter performing GET/PUT requests against one blob URL.
pub struct HttpSnapshotStore {
    client: Client,
    url: Url,
}

impl HttpSnapshotStore {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the blob URL or the reqwest client cannot be
    /// constructed.
    pub fn new(config: &BlobConfig, timeout: Duration) -> Result<Self, BlobStoreBuildError> {
        let url = config.blob_url()?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }
}

/// Construction failures for [`HttpSnapshotStore`].
#[derive(Debug, Error)]
pub enum BlobStoreBuildError {
    #[error(transparent)]
    Config(#[from] BlobConfigError),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

#[async_trait]
impl SnapshotStore for HttpSnapshotStore {
    async fn fetch(&self) -> Result<Option<Vec<u8>>, SnapshotStoreError> {
        debug!("fetching snapshot blob");
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(Some(body.to_vec()))
    }

    async fn store(&self, snapshot: Vec<u8>) -> Result<(), SnapshotStoreError> {
        debug!(bytes = snapshot.len(), "uploading snapshot blob");
        let response = self
            .client
            .put(self.url.clone())
            .header("x-ms-blob-type", "BlockBlob")
            .header("x-ms-version", BLOB_API_VERSION)
            .body(snapshot)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.map_err(map_transport_error)?;
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(())
    }
}

fn map_transport_error(error: reqwest::Error) -> SnapshotStoreError {
    SnapshotStoreError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> SnapshotStoreError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {preview}", status.as_u16())
    };
    SnapshotStoreError::rejected(status.as_u16(), message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
