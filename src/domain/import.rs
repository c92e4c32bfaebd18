//! Bulk-import result types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Rows processed for one table during a bulk import.
///
/// The count covers both branches of the merge: rows updated in place and
/// rows inserted fresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableImportCount {
    /// Table name as declared in the import order.
    pub table: String,
    /// Number of uploaded rows merged into the live table.
    pub rows: u64,
}

/// Per-table summary of one bulk-import call, in declared table order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub counts: Vec<TableImportCount>,
}

impl ImportSummary {
    /// Record the processed-row count for one table.
    pub fn record(&mut self, table: impl Into<String>, rows: u64) {
        self.counts.push(TableImportCount {
            table: table.into(),
            rows,
        });
    }

    /// Human-readable summary line, e.g.
    /// `Successfully Imported 2 Locations; Imported 3 Equipments`.
    pub fn message(&self) -> String {
        let parts: Vec<String> = self
            .counts
            .iter()
            .map(|count| format!("Imported {} {}s", count.rows, count.table))
            .collect();
        format!("Successfully {}", parts.join("; "))
    }
}
