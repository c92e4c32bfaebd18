//! Request-scoped SQLite workspace materialised from snapshot bytes.
//!
//! A workspace owns a named temporary file plus one `rusqlite` connection to
//! it. Dropping the workspace closes the connection and unlinks the file, so
//! cleanup holds on every exit path without explicit release calls.

use std::io::Write;

use rusqlite::Connection;
use tempfile::NamedTempFile;
use thiserror::Error;

use super::schema;

/// Failures while materialising or serialising a workspace.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("workspace file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("workspace database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// A local, file-backed relational handle for the duration of one request.
///
/// Never shared across requests; callers own it exclusively.
pub struct Workspace {
    temp: NamedTempFile,
    conn: Connection,
}

impl Workspace {
    /// Materialise snapshot bytes into a queryable handle.
    pub fn from_snapshot(snapshot: &[u8]) -> Result<Self, WorkspaceError> {
        let mut temp = NamedTempFile::new()?;
        temp.write_all(snapshot)?;
        temp.flush()?;
        let conn = Connection::open(temp.path())?;
        Ok(Self { temp, conn })
    }

    /// Create a fresh workspace holding the empty schema.
    ///
    /// Used once at first boot when the remote store holds no snapshot yet.
    pub fn create_empty() -> Result<Self, WorkspaceError> {
        let temp = NamedTempFile::new()?;
        let conn = Connection::open(temp.path())?;
        schema::apply_schema(&conn)?;
        Ok(Self { temp, conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn conn_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Serialise the entire workspace back into snapshot bytes.
    ///
    /// Closes the connection first so committed pages are flushed to the
    /// backing file before it is read. The temporary file is unlinked when
    /// the returned bytes go out of scope with the consumed `self`.
    pub fn into_snapshot(self) -> Result<Vec<u8>, WorkspaceError> {
        let Self { temp, conn } = self;
        drop(conn);
        Ok(std::fs::read(temp.path())?)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn empty_workspace_round_trips_through_snapshot_bytes() {
        let workspace = Workspace::create_empty().expect("workspace builds");
        let bytes = workspace.into_snapshot().expect("snapshot serialises");
        assert!(!bytes.is_empty(), "empty schema still produces file bytes");

        let reopened = Workspace::from_snapshot(&bytes).expect("snapshot materialises");
        let tables: i64 = reopened
            .conn()
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'",
                [],
                |row| row.get(0),
            )
            .expect("schema query succeeds");
        assert_eq!(tables, 2, "Location and Equipment tables persist");
    }

    #[test]
    fn temp_file_is_removed_on_drop() {
        let workspace = Workspace::create_empty().expect("workspace builds");
        let path = workspace.temp.path().to_path_buf();
        assert!(path.exists());
        drop(workspace);
        assert!(!path.exists(), "backing file unlinked on drop");
    }

    #[test]
    fn garbage_bytes_fail_on_first_query_not_open() {
        let workspace = Workspace::from_snapshot(b"not a database").expect("open is lazy");
        let result: Result<i64, _> = workspace.conn().query_row(
            "SELECT COUNT(*) FROM sqlite_master",
            [],
            |row| row.get(0),
        );
        assert!(result.is_err(), "querying a non-database file fails");
    }
}
