//! Operational endpoints outside the `/api` business scope.

pub mod health;
