//! Equipment record type.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A tracked piece of equipment.
///
/// `equipment_id` is externally assigned, like [`crate::domain::Location`]'s
/// key. `location_id` is a logical reference to a Location row; it is not
/// enforced in the merge path, so a dangling reference is permitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    /// Externally assigned primary key.
    #[schema(example = 42)]
    pub equipment_id: i64,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub equipment_type: Option<String>,
    pub status: Option<String>,
    pub purchase_date: Option<String>,
    pub location_id: Option<i64>,
}
