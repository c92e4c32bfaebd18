//! Typed Location reads and inserts against a workspace connection.

use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::Location;

/// All Location rows in store order.
pub fn list_all(conn: &Connection) -> Result<Vec<Location>, rusqlite::Error> {
    let mut stmt = conn
        .prepare("SELECT locationId, name, address, city, state, zipcode FROM Location")?;
    let rows = stmt.query_map([], |row| {
        Ok(Location {
            location_id: row.get(0)?,
            name: row.get(1)?,
            address: row.get(2)?,
            city: row.get(3)?,
            state: row.get(4)?,
            zipcode: row.get(5)?,
        })
    })?;
    rows.collect()
}

/// Whether a Location with this id is already present.
pub fn exists(conn: &Connection, location_id: i64) -> Result<bool, rusqlite::Error> {
    conn.query_row(
        "SELECT 1 FROM Location WHERE locationId = ?1",
        [location_id],
        |_| Ok(()),
    )
    .optional()
    .map(|found| found.is_some())
}

/// Insert a new Location row. The caller checks [`exists`] first inside the
/// same transaction; the primary key constraint is the backstop.
pub fn insert(conn: &Connection, location: &Location) -> Result<(), rusqlite::Error> {
    conn.execute(
        "INSERT INTO Location (locationId, name, address, city, state, zipcode)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            location.location_id,
            location.name,
            location.address,
            location.city,
            location.state,
            location.zipcode,
        ],
    )?;
    Ok(())
}
