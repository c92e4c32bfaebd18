//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod authenticator;
mod records;
mod snapshot_store;

pub use authenticator::{Authenticator, StaticAuthenticator};
pub use records::{BulkImporter, EquipmentPort, LocationsPort};
pub use snapshot_store::{MemorySnapshotStore, SnapshotStore, SnapshotStoreError};
