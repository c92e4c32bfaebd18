//! Driven port for the remote snapshot blob store.
//!
//! The whole SQLite database travels as one opaque blob under a fixed
//! container/name pair. The remote store is the single source of truth
//! between requests; adapters never hold state across calls.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while talking to the blob store.
    pub enum SnapshotStoreError {
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "snapshot store transport failed: {message}",
        /// The store answered with a non-success status other than 404.
        Rejected { status: u16, message: String } =>
            "snapshot store rejected request ({status}): {message}",
    }
}

/// Port for fetching and overwriting the snapshot blob.
///
/// `fetch` distinguishes "truly absent" (`Ok(None)`, the expected state on
/// first boot) from transport or auth failures, which are errors. Callers
/// must not treat a failed fetch as an invitation to reinitialise the
/// database; doing so would silently discard existing data.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Retrieve the current snapshot blob, or `None` when none was ever stored.
    async fn fetch(&self) -> Result<Option<Vec<u8>>, SnapshotStoreError>;

    /// Overwrite the blob unconditionally. Repeated identical stores are safe;
    /// there is no versioning or conditional-write token, so concurrent
    /// writers race and the last upload wins.
    async fn store(&self, snapshot: Vec<u8>) -> Result<(), SnapshotStoreError>;
}

/// In-memory store used by tests and local development.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    blob: std::sync::Mutex<Option<Vec<u8>>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an existing blob.
    pub fn with_blob(blob: Vec<u8>) -> Self {
        Self {
            blob: std::sync::Mutex::new(Some(blob)),
        }
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn fetch(&self) -> Result<Option<Vec<u8>>, SnapshotStoreError> {
        let guard = self
            .blob
            .lock()
            .map_err(|_| SnapshotStoreError::transport("memory store poisoned"))?;
        Ok(guard.clone())
    }

    async fn store(&self, snapshot: Vec<u8>) -> Result<(), SnapshotStoreError> {
        let mut guard = self
            .blob
            .lock()
            .map_err(|_| SnapshotStoreError::transport("memory store poisoned"))?;
        *guard = Some(snapshot);
        Ok(())
    }
}
