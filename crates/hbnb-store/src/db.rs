//! Database connection management
//!
//! Provides utilities for opening and configuring SQLite connections

use crate::config::DbTarget;
use crate::errors::{connection_error, from_rusqlite, Result};
use rusqlite::Connection;
use std::path::Path;

/// Open a SQLite database at the given path
///
/// # Errors
///
/// Returns a `Connection` error if the engine cannot open the file.
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    let path = path.as_ref();
    Connection::open(path).map_err(|e| {
        connection_error(
            "open",
            &format!("cannot open database {}: {}", path.display(), e),
        )
    })
}

/// Open an in-memory SQLite database
///
/// # Errors
///
/// Returns a `Connection` error if the engine cannot be initialised.
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory()
        .map_err(|e| connection_error("open", &format!("cannot open in-memory database: {}", e)))
}

/// Open whatever the configuration points at
///
/// # Errors
///
/// Returns a `Connection` error if the engine cannot be reached.
pub fn open_target(target: &DbTarget) -> Result<Connection> {
    match target {
        DbTarget::Memory => open_in_memory(),
        DbTarget::Path(path) => open(path),
    }
}

/// Configure a connection: foreign keys on, WAL for file databases
///
/// # Errors
///
/// Returns a `Connection` error if the pragmas cannot be applied; a
/// database that rejects them is not usable.
pub fn configure(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON")
        .map_err(|e| connection_error("configure", &e.to_string()))?;
    // The pragma is a silent no-op inside a transaction or on builds without FK support
    if !foreign_keys_enabled(conn)? {
        return Err(connection_error(
            "configure",
            "foreign key enforcement could not be enabled",
        ));
    }

    // journal_mode answers with a row, so it cannot go through execute()
    let mode: String = conn
        .query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))
        .map_err(from_rusqlite)?;
    tracing::debug!(journal_mode = %mode, "database configured");

    Ok(())
}

/// Whether foreign key enforcement is active on this connection
///
/// # Errors
///
/// Returns a `Persistence` error if the pragma cannot be read.
fn foreign_keys_enabled(conn: &Connection) -> Result<bool> {
    conn.query_row("PRAGMA foreign_keys", [], |row| row.get::<_, i64>(0))
        .map(|v| v == 1)
        .map_err(from_rusqlite)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbnb_core::HbErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_configure_enables_foreign_keys() {
        let conn = open_in_memory().unwrap();
        configure(&conn).unwrap();
        assert!(foreign_keys_enabled(&conn).unwrap());
    }

    #[test]
    fn test_open_unreachable_path_is_connection_error() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("no").join("such").join("dir").join("x.db");

        let err = open(&target).unwrap_err();
        assert_eq!(err.kind(), HbErrorKind::Connection);
    }
}
