//! Transport-agnostic domain types for the snapshot-backed asset store.

mod equipment;
mod error;
mod import;
mod location;
pub mod ports;

pub use equipment::Equipment;
pub use error::{Error, ErrorCode};
pub use import::{ImportSummary, TableImportCount};
pub use location::Location;
