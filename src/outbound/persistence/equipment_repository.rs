//! Typed Equipment reads and inserts against a workspace connection.

use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::Equipment;

/// All Equipment rows in store order.
pub fn list_all(conn: &Connection) -> Result<Vec<Equipment>, rusqlite::Error> {
    let mut stmt = conn.prepare(
        "SELECT equipmentId, name, type, status, purchaseDate, locationId FROM Equipment",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(Equipment {
            equipment_id: row.get(0)?,
            name: row.get(1)?,
            equipment_type: row.get(2)?,
            status: row.get(3)?,
            purchase_date: row.get(4)?,
            location_id: row.get(5)?,
        })
    })?;
    rows.collect()
}

/// Whether an Equipment record with this id is already present.
pub fn exists(conn: &Connection, equipment_id: i64) -> Result<bool, rusqlite::Error> {
    conn.query_row(
        "SELECT 1 FROM Equipment WHERE equipmentId = ?1",
        [equipment_id],
        |_| Ok(()),
    )
    .optional()
    .map(|found| found.is_some())
}

/// Insert a new Equipment row. The `locationId` reference is not checked
/// against the Location table; dangling references are permitted.
pub fn insert(conn: &Connection, equipment: &Equipment) -> Result<(), rusqlite::Error> {
    conn.execute(
        "INSERT INTO Equipment (equipmentId, name, type, status, purchaseDate, locationId)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            equipment.equipment_id,
            equipment.name,
            equipment.equipment_type,
            equipment.status,
            equipment.purchase_date,
            equipment.location_id,
        ],
    )?;
    Ok(())
}
