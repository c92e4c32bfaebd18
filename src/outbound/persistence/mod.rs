//! Snapshot-backed persistence: workspaces, repositories, merge, orchestration.

pub mod equipment_repository;
pub mod location_repository;
pub mod merge;
mod orchestrator;
pub mod schema;
mod snapshot_ports;
pub mod workspace;

pub use merge::MergeError;
pub use orchestrator::SnapshotPersistence;
pub use schema::MERGE_TABLES;
pub use snapshot_ports::{SnapshotBulkImporter, SnapshotEquipment, SnapshotLocations};
pub use workspace::{Workspace, WorkspaceError};
