//! Single-writer connection guarded by a mutex.

pub mod pragmas;

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use tuvung_core::config::StorageConfig;
use tuvung_core::errors::TuvungResult;

use crate::{map_sqlite_err, to_storage_err};

/// The store's one write connection. The evolution log and all query
/// modules run through it serially.
pub struct StoreConnection {
    conn: Mutex<Connection>,
}

impl StoreConnection {
    /// Open a file-backed connection and apply pragmas.
    pub fn open(path: &Path, config: &StorageConfig) -> TuvungResult<Self> {
        let conn = Connection::open(path).map_err(map_sqlite_err)?;
        pragmas::apply_pragmas(&conn, config)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory connection (for testing).
    pub fn open_in_memory(config: &StorageConfig) -> TuvungResult<Self> {
        let conn = Connection::open_in_memory().map_err(map_sqlite_err)?;
        pragmas::apply_pragmas(&conn, config)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Execute a closure with the connection.
    pub fn with_conn_sync<F, T>(&self, f: F) -> TuvungResult<T>
    where
        F: FnOnce(&Connection) -> TuvungResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|e| to_storage_err(format!("connection lock poisoned: {e}")))?;
        f(&guard)
    }
}
