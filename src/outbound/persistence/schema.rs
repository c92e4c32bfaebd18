//! Snapshot schema and run-time table introspection.
//!
//! The merge engine consumes [`describe_table`] instead of hardcoding column
//! lists per table, so adding a table to [`MERGE_TABLES`] is the only change
//! needed to widen the import surface.

use rusqlite::Connection;

/// Tables reconciled by the bulk import, in report order.
pub const MERGE_TABLES: [&str; 2] = ["Location", "Equipment"];

const SCHEMA_SQL: &str = "\
CREATE TABLE IF NOT EXISTS Location (
    locationId INTEGER PRIMARY KEY,
    name TEXT,
    address TEXT,
    city TEXT,
    state TEXT,
    zipcode TEXT
);
CREATE TABLE IF NOT EXISTS Equipment (
    equipmentId INTEGER PRIMARY KEY,
    name TEXT,
    type TEXT,
    status TEXT,
    purchaseDate TEXT,
    locationId INTEGER,
    FOREIGN KEY(locationId) REFERENCES Location(locationId)
);";

/// Create the empty schema on a fresh workspace.
pub fn apply_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)
}

/// One column of a table, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    pub primary_key: bool,
}

/// Ordered column descriptors for `table`, via `PRAGMA table_info`.
pub fn describe_table(
    conn: &Connection,
    table: &str,
) -> Result<Vec<ColumnDescriptor>, rusqlite::Error> {
    let sql = format!("PRAGMA table_info({})", quote_identifier(table));
    let mut stmt = conn.prepare(&sql)?;
    let columns = stmt
        .query_map([], |row| {
            Ok(ColumnDescriptor {
                name: row.get("name")?,
                primary_key: row.get::<_, i64>("pk")? > 0,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(columns)
}

/// Whether `table` exists in the given database.
pub fn table_exists(conn: &Connection, table: &str) -> Result<bool, rusqlite::Error> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [table],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Quote an identifier for interpolation into SQL text.
///
/// Table and column names reach the merge engine from uploaded files, so they
/// must never be spliced in raw.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
