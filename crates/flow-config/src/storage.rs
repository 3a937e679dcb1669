//! Storage location and change-trail configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ConfigError;

const fn default_trail() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding the JSON documents. Empty means the platform data
    /// directory (`~/.local/share/auditflow` on Linux).
    #[serde(default)]
    pub data_dir: String,

    /// Whether saves and deletes are appended to the JSONL change trail.
    #[serde(default = "default_trail")]
    pub trail: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: String::new(),
            trail: default_trail(),
        }
    }
}

impl StorageConfig {
    pub fn is_configured(&self) -> bool {
        !self.data_dir.trim().is_empty()
    }

    /// The directory documents live in.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoDataDir` when `data_dir` is empty and the
    /// platform exposes no data directory.
    pub fn resolve_data_dir(&self) -> Result<PathBuf, ConfigError> {
        if self.is_configured() {
            return Ok(PathBuf::from(self.data_dir.trim()));
        }
        dirs::data_dir()
            .map(|p| p.join("auditflow"))
            .ok_or(ConfigError::NoDataDir)
    }

    /// Directory for the JSONL change trail.
    ///
    /// # Errors
    ///
    /// Same as [`Self::resolve_data_dir`].
    pub fn trail_dir(&self) -> Result<PathBuf, ConfigError> {
        Ok(self.resolve_data_dir()?.join("trail"))
    }
}
