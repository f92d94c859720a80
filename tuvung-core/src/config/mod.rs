//! Runtime configuration.

mod defaults;
mod storage_config;

pub use storage_config::StorageConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{TuvungError, TuvungResult};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TuvungConfig {
    pub storage: StorageConfig,
}

impl TuvungConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> TuvungResult<Self> {
        toml::from_str(text).map_err(|e| TuvungError::ConfigError {
            reason: e.to_string(),
        })
    }
}
