//! # tuvung-storage
//!
//! SQLite persistence for the vocabulary store: connection handling with
//! pragmas, the `ISchemaStore` implementation with snapshot introspection,
//! the schema evolution log and its applied ledger, the typed query layer,
//! and the `StorageEngine` facade implementing `IVocabularyStorage`.

pub mod connection;
pub mod engine;
pub mod migrations;
pub mod queries;
pub mod store;

pub use engine::{bootstrap_topics, StorageEngine};
pub use store::SqliteStore;

use tuvung_core::errors::{StorageError, TuvungError};

/// Wrap a backend message in the storage error type.
pub fn to_storage_err(message: impl Into<String>) -> TuvungError {
    TuvungError::StorageError(StorageError::SqliteError {
        message: message.into(),
    })
}

/// Map a rusqlite error onto the storage taxonomy: constraint failures and
/// duplicate-object conflicts get their own variants so callers can match
/// on them; everything else carries the backend message.
pub(crate) fn map_sqlite_err(e: rusqlite::Error) -> TuvungError {
    if let rusqlite::Error::SqliteFailure(failure, Some(message)) = &e {
        if failure.code == rusqlite::ErrorCode::ConstraintViolation {
            return TuvungError::StorageError(StorageError::ConstraintViolation {
                constraint: constraint_label(message),
                reason: message.clone(),
            });
        }
        if message.contains("already exists") {
            return TuvungError::StorageError(StorageError::SchemaConflict {
                object: conflict_object(message),
                reason: message.clone(),
            });
        }
    }
    to_storage_err(e.to_string())
}

/// Constraint identifier from a SQLite failure message, e.g.
/// "UNIQUE constraint failed: user.email" yields "user.email" and
/// "CHECK constraint failed: learning_status_enum" yields the constraint
/// name.
fn constraint_label(message: &str) -> String {
    message
        .split(": ")
        .nth(1)
        .unwrap_or(message)
        .to_string()
}

/// Offending identifier from a duplicate-object message, e.g.
/// "index idx_x already exists" yields "idx_x".
fn conflict_object(message: &str) -> String {
    message
        .split_whitespace()
        .nth(1)
        .unwrap_or(message)
        .to_string()
}
