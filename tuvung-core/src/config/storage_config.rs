//! Storage configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Settings for the SQLite store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file path. None opens an in-memory store.
    pub db_path: Option<PathBuf>,

    /// How long a writer waits on a locked database before giving up.
    pub busy_timeout_ms: u64,

    /// Journal mode requested at open.
    pub journal_mode: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            busy_timeout_ms: defaults::busy_timeout_ms(),
            journal_mode: defaults::journal_mode(),
        }
    }
}

impl StorageConfig {
    /// Config pointing at a database file.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: Some(path.into()),
            ..Self::default()
        }
    }
}
