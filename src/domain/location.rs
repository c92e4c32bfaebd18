//! Location record type.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A physical site that equipment can be assigned to.
///
/// `location_id` is externally assigned by the client, not auto-incremented;
/// the store rejects a second record with the same id. All descriptive fields
/// are nullable in practice, matching the snapshot schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Externally assigned primary key.
    #[schema(example = 1)]
    pub location_id: i64,
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
}
