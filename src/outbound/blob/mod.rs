//! Reqwest-backed snapshot store adapter for Azure Blob Storage.
//!
//! This adapter owns transport details only: building the blob URL from a
//! connection string, HTTP status mapping, and the not-found contract. The
//! whole database file travels as one opaque block blob; there is no
//! versioning metadata alongside it.

mod http_store;

pub use http_store::{BlobConfig, BlobConfigError, BlobStoreBuildError, HttpSnapshotStore};
