//! Driving ports for record reads, inserts, and bulk import.
//!
//! HTTP handlers depend on these use-case traits so handler tests can
//! substitute stubs instead of wiring snapshot persistence.

use async_trait::async_trait;

use crate::domain::{Equipment, Error, ImportSummary, Location};

/// Use-case port for Location reads and inserts.
#[async_trait]
pub trait LocationsPort: Send + Sync {
    /// List every Location in store order.
    async fn list(&self) -> Result<Vec<Location>, Error>;

    /// Insert a new Location.
    ///
    /// Fails with [`crate::domain::ErrorCode::Conflict`] when the id already
    /// exists, and with [`crate::domain::ErrorCode::PersistFailed`] when the
    /// row committed locally but the snapshot upload failed.
    async fn add(&self, location: Location) -> Result<(), Error>;
}

/// Use-case port for Equipment reads and inserts.
#[async_trait]
pub trait EquipmentPort: Send + Sync {
    /// List every Equipment record in store order.
    async fn list(&self) -> Result<Vec<Equipment>, Error>;

    /// Insert a new Equipment record; same failure contract as
    /// [`LocationsPort::add`].
    async fn add(&self, equipment: Equipment) -> Result<(), Error>;
}

/// Use-case port for merging an uploaded snapshot into the live one.
#[async_trait]
pub trait BulkImporter: Send + Sync {
    /// Merge the tables of interest from `snapshot` (a whole SQLite file)
    /// into the live store inside one transaction. Returns per-table
    /// processed-row counts in declared order.
    async fn import(&self, snapshot: Vec<u8>) -> Result<ImportSummary, Error>;
}
