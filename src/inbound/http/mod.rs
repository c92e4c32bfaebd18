//! Inbound HTTP adapter: handlers, state, and error mapping.

pub mod auth;
pub mod equipment;
mod error;
pub mod import;
pub mod locations;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;

pub use error::{json_error_handler, ApiResult};
