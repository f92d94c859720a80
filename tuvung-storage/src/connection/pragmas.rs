//! PRAGMA configuration applied to every connection.
//!
//! Journal mode and busy timeout come from config; NORMAL sync and
//! foreign_keys ON are fixed. The cascade deletes in the schema depend on
//! foreign_keys being enforced.

use rusqlite::Connection;

use tuvung_core::config::StorageConfig;
use tuvung_core::errors::TuvungResult;

use crate::map_sqlite_err;

/// Apply the pragma set to a connection.
pub fn apply_pragmas(conn: &Connection, config: &StorageConfig) -> TuvungResult<()> {
    conn.execute_batch(&format!(
        "
        PRAGMA journal_mode = {};
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = {};
        PRAGMA foreign_keys = ON;
        ",
        config.journal_mode, config.busy_timeout_ms,
    ))
    .map_err(map_sqlite_err)?;
    Ok(())
}

/// Verify that WAL mode is active on a connection.
pub fn verify_wal_mode(conn: &Connection) -> TuvungResult<bool> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(map_sqlite_err)?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}

/// Verify that foreign key enforcement is on.
pub fn verify_foreign_keys(conn: &Connection) -> TuvungResult<bool> {
    let enabled: i64 = conn
        .pragma_query_value(None, "foreign_keys", |row| row.get(0))
        .map_err(map_sqlite_err)?;
    Ok(enabled == 1)
}
