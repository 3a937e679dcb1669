//! # flow-config
//!
//! Layered configuration loading for AuditFlow using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`AUDITFLOW_*` prefix, `__` as separator)
//! 2. Project-level `.auditflow/config.toml`
//! 3. User-level `~/.config/auditflow/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `AUDITFLOW_STORAGE__DATA_DIR` -> `storage.data_dir`.
//!
//! ```no_run
//! use flow_config::FlowConfig;
//!
//! let config = FlowConfig::load_with_dotenv().expect("config");
//! let data_dir = config.storage.resolve_data_dir().expect("data dir");
//! println!("documents in {}", data_dir.display());
//! ```

mod error;
mod general;
mod storage;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use storage::StorageConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FlowConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl FlowConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` when a source fails to parse or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.env` from the current directory, then [`Self::load`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".auditflow/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("AUDITFLOW_").split("__"))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.general.default_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.default_limit".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("auditflow").join("config.toml"))
    }
}
