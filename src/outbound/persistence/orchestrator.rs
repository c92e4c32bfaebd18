//! Snapshot persistence orchestration.
//!
//! Sequences every data-touching request the same way: fetch the whole
//! snapshot, materialise it into a request-scoped workspace, run one
//! operation, and for mutations re-upload the whole file before returning.
//! The remote store is the source of truth between requests; concurrent
//! mutators race fetch-modify-upload and the last upload wins.

use std::sync::Arc;

use rusqlite::Connection;
use tokio::task;
use tracing::{error, info};

use crate::domain::ports::{SnapshotStore, SnapshotStoreError};
use crate::domain::Error;

use super::workspace::{Workspace, WorkspaceError};

/// Downloads, materialises, and re-uploads snapshots around one operation.
#[derive(Clone)]
pub struct SnapshotPersistence {
    store: Arc<dyn SnapshotStore>,
}

impl SnapshotPersistence {
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self { store }
    }

    /// First-boot initialisation: create and persist an empty snapshot when
    /// the store holds none.
    ///
    /// A fetch failure is fatal here rather than a trigger to reinitialise;
    /// re-creating the database on a transient error would silently discard
    /// existing data.
    pub async fn ensure_initialised(&self) -> Result<(), Error> {
        match self.store.fetch().await.map_err(map_store_error)? {
            Some(_) => {
                info!("snapshot found in blob store");
                Ok(())
            }
            None => {
                info!("no snapshot in blob store; creating empty schema");
                let snapshot =
                    task::spawn_blocking(|| Workspace::create_empty()?.into_snapshot())
                        .await
                        .map_err(map_join_error)?
                        .map_err(map_workspace_error)?;
                self.store.store(snapshot).await.map_err(map_store_error)
            }
        }
    }

    /// Run a read-only operation against a freshly materialised workspace.
    ///
    /// The workspace is discarded afterwards; nothing is re-uploaded.
    pub async fn read<T, F>(&self, op: F) -> Result<T, Error>
    where
        F: FnOnce(&Connection) -> Result<T, Error> + Send + 'static,
        T: Send + 'static,
    {
        let snapshot = self.fetch_required().await?;
        task::spawn_blocking(move || {
            let workspace = Workspace::from_snapshot(&snapshot).map_err(map_workspace_error)?;
            op(workspace.conn())
        })
        .await
        .map_err(map_join_error)?
    }

    /// Run a mutating operation, then serialise and re-upload the full
    /// snapshot.
    ///
    /// When the upload fails after the operation committed locally, the
    /// returned error carries [`crate::domain::ErrorCode::PersistFailed`] so
    /// callers can distinguish "succeeded but not durably stored" from a
    /// total failure.
    pub async fn mutate<T, F>(&self, op: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Connection) -> Result<T, Error> + Send + 'static,
        T: Send + 'static,
    {
        let snapshot = self.fetch_required().await?;
        let (value, snapshot) = task::spawn_blocking(move || {
            let mut workspace =
                Workspace::from_snapshot(&snapshot).map_err(map_workspace_error)?;
            let value = op(workspace.conn_mut())?;
            let snapshot = workspace.into_snapshot().map_err(map_workspace_error)?;
            Ok::<_, Error>((value, snapshot))
        })
        .await
        .map_err(map_join_error)??;

        if let Err(err) = self.store.store(snapshot).await {
            error!(error = %err, "snapshot upload failed after local commit");
            return Err(Error::persist_failed(
                "The change was committed locally but failed to update cloud storage",
            ));
        }
        Ok(value)
    }

    /// Fetch the snapshot for a request arriving after initialisation.
    ///
    /// Absence at this point means the remote blob was deleted out from
    /// under a running service, which is a hard failure.
    async fn fetch_required(&self) -> Result<Vec<u8>, Error> {
        match self.store.fetch().await.map_err(map_store_error)? {
            Some(snapshot) => Ok(snapshot),
            None => {
                error!("snapshot blob is missing from the remote store after initialisation");
                Err(Error::internal("Failed to download current database"))
            }
        }
    }
}

fn map_store_error(err: SnapshotStoreError) -> Error {
    Error::internal(err.to_string())
}

fn map_workspace_error(err: WorkspaceError) -> Error {
    Error::internal(err.to_string())
}

fn map_join_error(err: task::JoinError) -> Error {
    Error::internal(format!("blocking task failed: {err}"))
}
