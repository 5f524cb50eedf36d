//! Error handling for hbnb-store
//!
//! Wraps hbnb-core HbError with store-specific helpers. Every failure that
//! leaves a backend is one of these, already classified by kind.

use hbnb_core::errors::{HbError, HbErrorKind, HbnbError};
use rusqlite::ErrorCode;
use std::path::Path;

/// Result type alias using HbError
pub type Result<T> = std::result::Result<T, HbError>;

/// Create a not-found error for an identity key
pub fn not_found(op: &str, key: &str) -> HbError {
    HbError::from(HbnbError::EntityNotFound {
        key: key.to_string(),
    })
    .with_op(op)
}

/// Create a corrupt-storage error for an unreadable durable file
pub fn corrupt_storage(path: &Path, reason: &str) -> HbError {
    HbError::new(HbErrorKind::CorruptStorage)
        .with_op("reload")
        .with_message(format!("{} is not a valid store: {}", path.display(), reason))
}

/// Create a connection error
pub fn connection_error(op: &str, reason: &str) -> HbError {
    HbError::new(HbErrorKind::Connection)
        .with_op(op.to_string())
        .with_message(reason.to_string())
}

/// Error returned when an operation needs a session and none is open
pub fn session_closed(op: &str) -> HbError {
    connection_error(op, "no open session; call reload() first")
}

/// Error returned while a failed commit has not been rolled back
pub fn session_failed(op: &str) -> HbError {
    HbError::new(HbErrorKind::ConstraintViolation)
        .with_op(op.to_string())
        .with_message("session has a failed commit pending; call rollback() first")
}

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> HbError {
    HbError::new(HbErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> HbError {
    HbError::new(HbErrorKind::ConstraintViolation)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

/// Create a database error from rusqlite::Error
///
/// Constraint failures (NOT NULL, FOREIGN KEY, PRIMARY KEY) become
/// `ConstraintViolation`; everything else the engine reports is `Persistence`.
pub fn from_rusqlite(err: rusqlite::Error) -> HbError {
    let kind = match &err {
        rusqlite::Error::SqliteFailure(e, _) => match e.code {
            ErrorCode::ConstraintViolation => HbErrorKind::ConstraintViolation,
            ErrorCode::CannotOpen | ErrorCode::NotADatabase => HbErrorKind::Connection,
            _ => HbErrorKind::Persistence,
        },
        _ => HbErrorKind::Persistence,
    };
    HbError::new(kind)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> HbError {
    HbError::new(HbErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create a serialization error
pub fn serialization_error(operation: &str, err: serde_json::Error) -> HbError {
    HbError::new(HbErrorKind::Serialization)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
