//! Snapshot-backed adapters for the record and bulk-import ports.
//!
//! Each adapter runs its operation through [`SnapshotPersistence`], so every
//! call observes the download-mutate-upload lifecycle. Conflict checks happen
//! inside a transaction on the request's own workspace handle, which is never
//! shared, so check-then-insert cannot race within one request.

use async_trait::async_trait;
use tokio::task;

use crate::domain::ports::{BulkImporter, EquipmentPort, LocationsPort};
use crate::domain::{Equipment, Error, ErrorCode, ImportSummary, Location};

use super::merge::{self, MergeError};
use super::orchestrator::SnapshotPersistence;
use super::schema::MERGE_TABLES;
use super::workspace::Workspace;
use super::{equipment_repository, location_repository};

/// Snapshot-backed [`LocationsPort`] adapter.
#[derive(Clone)]
pub struct SnapshotLocations {
    persistence: SnapshotPersistence,
}

impl SnapshotLocations {
    pub fn new(persistence: SnapshotPersistence) -> Self {
        Self { persistence }
    }
}

#[async_trait]
impl LocationsPort for SnapshotLocations {
    async fn list(&self) -> Result<Vec<Location>, Error> {
        self.persistence
            .read(|conn| location_repository::list_all(conn).map_err(map_sqlite_error))
            .await
    }

    async fn add(&self, location: Location) -> Result<(), Error> {
        self.persistence
            .mutate(move |conn| {
                let tx = conn.transaction().map_err(map_sqlite_error)?;
                if location_repository::exists(&tx, location.location_id)
                    .map_err(map_sqlite_error)?
                {
                    return Err(Error::conflict("Location with this ID already exists"));
                }
                location_repository::insert(&tx, &location).map_err(map_sqlite_error)?;
                tx.commit().map_err(map_sqlite_error)
            })
            .await
            .map_err(|err| {
                relabel_persist_failure(err, "Location added but failed to update cloud storage")
            })
    }
}

/// Snapshot-backed [`EquipmentPort`] adapter.
#[derive(Clone)]
pub struct SnapshotEquipment {
    persistence: SnapshotPersistence,
}

impl SnapshotEquipment {
    pub fn new(persistence: SnapshotPersistence) -> Self {
        Self { persistence }
    }
}

#[async_trait]
impl EquipmentPort for SnapshotEquipment {
    async fn list(&self) -> Result<Vec<Equipment>, Error> {
        self.persistence
            .read(|conn| equipment_repository::list_all(conn).map_err(map_sqlite_error))
            .await
    }

    async fn add(&self, equipment: Equipment) -> Result<(), Error> {
        self.persistence
            .mutate(move |conn| {
                let tx = conn.transaction().map_err(map_sqlite_error)?;
                if equipment_repository::exists(&tx, equipment.equipment_id)
                    .map_err(map_sqlite_error)?
                {
                    return Err(Error::conflict("Equipment with this ID already exists"));
                }
                equipment_repository::insert(&tx, &equipment).map_err(map_sqlite_error)?;
                tx.commit().map_err(map_sqlite_error)
            })
            .await
            .map_err(|err| {
                relabel_persist_failure(err, "Equipment added but failed to update cloud storage")
            })
    }
}

/// Snapshot-backed [`BulkImporter`] adapter.
#[derive(Clone)]
pub struct SnapshotBulkImporter {
    persistence: SnapshotPersistence,
}

impl SnapshotBulkImporter {
    pub fn new(persistence: SnapshotPersistence) -> Self {
        Self { persistence }
    }
}

#[async_trait]
impl BulkImporter for SnapshotBulkImporter {
    async fn import(&self, snapshot: Vec<u8>) -> Result<ImportSummary, Error> {
        // Validate the upload before fetching the live snapshot so a bad file
        // never costs a download. The workspace then moves into the merge
        // closure; its temporary file is unlinked when the closure returns.
        let uploaded = task::spawn_blocking(move || -> Result<Workspace, Error> {
            let workspace = Workspace::from_snapshot(&snapshot)
                .map_err(|err| Error::internal(err.to_string()))?;
            merge::validate_tables(workspace.conn(), &MERGE_TABLES)
                .map_err(map_validation_error)?;
            Ok(workspace)
        })
        .await
        .map_err(|err| Error::internal(format!("blocking task failed: {err}")))??;

        self.persistence
            .mutate(move |conn| {
                merge::merge_snapshot(conn, uploaded.conn(), &MERGE_TABLES)
                    .map_err(map_merge_error)
            })
            .await
            .map_err(|err| {
                relabel_persist_failure(err, "Import successful but failed to update cloud storage")
            })
    }
}

fn map_sqlite_error(err: rusqlite::Error) -> Error {
    Error::internal(format!("database error: {err}"))
}

/// Map upload validation failures, before the live snapshot is touched.
fn map_validation_error(err: MergeError) -> Error {
    match err {
        MergeError::MissingTable { .. } => Error::invalid_request(err.to_string()),
        MergeError::Sqlite(_) => {
            Error::invalid_request("Invalid file type. Please upload a SQLite database file")
        }
    }
}

/// Map failures raised while merging into the live workspace.
fn map_merge_error(err: MergeError) -> Error {
    match err {
        MergeError::MissingTable { .. } => Error::invalid_request(err.to_string()),
        MergeError::Sqlite(inner) => {
            Error::internal(format!("An error occurred during import: {inner}"))
        }
    }
}

/// Put endpoint-specific wording on the shared partial-success signal.
fn relabel_persist_failure(err: Error, message: &str) -> Error {
    if err.code() == ErrorCode::PersistFailed {
        err.with_message(message)
    } else {
        err
    }
}
