//! Outbound adapters: blob transport and snapshot persistence.

pub mod blob;
pub mod persistence;
