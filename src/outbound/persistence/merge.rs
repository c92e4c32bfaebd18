//! Bulk-import merge engine.
//!
//! Reconciles the declared tables of an uploaded snapshot into the live
//! workspace: per-row existence check on the first column (treated as the
//! primary key), update-in-place of all non-key columns when the key exists,
//! verbatim insert otherwise. Every table merges inside one transaction, so
//! any row-level failure rolls back the whole import.

use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, OptionalExtension};
use thiserror::Error;
use tracing::debug;

use crate::domain::ImportSummary;

use super::schema::{describe_table, quote_identifier, table_exists, ColumnDescriptor};

/// Failures raised while validating or merging an uploaded snapshot.
#[derive(Debug, Error)]
pub enum MergeError {
    /// A declared table is absent from the uploaded snapshot.
    #[error("The uploaded database does not contain a '{table}' table")]
    MissingTable { table: String },
    /// Any SQLite failure; the caller's transaction rolls back on drop.
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Fail-fast presence check for every declared table.
///
/// Runs against the uploaded snapshot only, before the live snapshot is even
/// fetched, so a bad upload never costs a download.
pub fn validate_tables(uploaded: &Connection, tables: &[&str]) -> Result<(), MergeError> {
    for table in tables {
        if !table_exists(uploaded, table)? {
            return Err(MergeError::MissingTable {
                table: (*table).to_string(),
            });
        }
    }
    Ok(())
}

/// Merge every declared table from `uploaded` into `live` atomically.
///
/// Returns per-table processed-row counts in declared order. On error nothing
/// is applied: the transaction is dropped uncommitted.
pub fn merge_snapshot(
    live: &mut Connection,
    uploaded: &Connection,
    tables: &[&str],
) -> Result<ImportSummary, MergeError> {
    validate_tables(uploaded, tables)?;

    let tx = live.transaction()?;
    let mut summary = ImportSummary::default();
    for table in tables {
        let rows = merge_table(&tx, uploaded, table)?;
        debug!(table, rows, "merged uploaded table");
        summary.record(*table, rows);
    }
    tx.commit()?;
    Ok(summary)
}

fn merge_table(
    live: &Connection,
    uploaded: &Connection,
    table: &str,
) -> Result<u64, MergeError> {
    let columns = describe_table(uploaded, table)?;
    let Some(key) = columns.first() else {
        // A table reported by sqlite_master always has columns; treat an
        // empty descriptor the same as a missing table.
        return Err(MergeError::MissingTable {
            table: table.to_string(),
        });
    };

    let statements = MergeStatements::new(table, key, &columns);
    let mut select = uploaded.prepare(&statements.select)?;
    let mut rows = select.query([])?;

    let mut processed = 0u64;
    while let Some(row) = rows.next()? {
        let values = (0..columns.len())
            .map(|index| row.get::<_, Value>(index))
            .collect::<Result<Vec<_>, _>>()?;
        upsert_row(live, &statements, values)?;
        processed += 1;
    }
    Ok(processed)
}

fn upsert_row(
    live: &Connection,
    statements: &MergeStatements,
    values: Vec<Value>,
) -> Result<(), MergeError> {
    let key = values
        .first()
        .cloned()
        .unwrap_or(Value::Null);
    let present = live
        .query_row(&statements.exists, [&key], |_| Ok(()))
        .optional()?
        .is_some();

    match (&statements.update, present) {
        (Some(update), true) => {
            // Non-key columns first, key last, matching the SET/WHERE order.
            let params = values.into_iter().skip(1).chain(std::iter::once(key));
            live.execute(update, params_from_iter(params))?;
        }
        (None, true) => {
            // Single-column table: the key exists and there is nothing to update.
        }
        (_, false) => {
            live.execute(&statements.insert, params_from_iter(values))?;
        }
    }
    Ok(())
}

/// Pre-rendered SQL for one table's merge, built from introspected columns.
struct MergeStatements {
    select: String,
    exists: String,
    /// Absent when the table has no non-key columns.
    update: Option<String>,
    insert: String,
}

impl MergeStatements {
    fn new(table: &str, key: &ColumnDescriptor, columns: &[ColumnDescriptor]) -> Self {
        let quoted_table = quote_identifier(table);
        let quoted_columns: Vec<String> = columns
            .iter()
            .map(|column| quote_identifier(&column.name))
            .collect();
        let quoted_key = quote_identifier(&key.name);

        let select = format!(
            "SELECT {} FROM {quoted_table}",
            quoted_columns.join(", ")
        );
        let exists = format!("SELECT 1 FROM {quoted_table} WHERE {quoted_key} = ?1");

        let set_clauses: Vec<String> = quoted_columns
            .iter()
            .skip(1)
            .enumerate()
            .map(|(index, column)| format!("{column} = ?{}", index + 1))
            .collect();
        let update = (!set_clauses.is_empty()).then(|| {
            format!(
                "UPDATE {quoted_table} SET {} WHERE {quoted_key} = ?{}",
                set_clauses.join(", "),
                set_clauses.len() + 1
            )
        });

        let placeholders: Vec<String> = (1..=quoted_columns.len())
            .map(|index| format!("?{index}"))
            .collect();
        let insert = format!(
            "INSERT INTO {quoted_table} ({}) VALUES ({})",
            quoted_columns.join(", "),
            placeholders.join(", ")
        );

        Self {
            select,
            exists,
            update,
            insert,
        }
    }
}
