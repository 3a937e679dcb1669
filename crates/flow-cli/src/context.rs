use std::path::PathBuf;

use anyhow::Context;
use flow_config::FlowConfig;
use flow_store::FlowService;

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: FlowService,
    pub config: FlowConfig,
    pub data_dir: PathBuf,
}

impl AppContext {
    /// Open the data directory: `--data-dir` wins over configuration.
    pub fn init(config: FlowConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let data_dir = match &flags.data_dir {
            Some(dir) => PathBuf::from(dir),
            None => config.storage.resolve_data_dir()?,
        };
        let service = FlowService::open(&data_dir, config.storage.trail)
            .with_context(|| format!("cannot open data directory {}", data_dir.display()))?;
        Ok(Self {
            service,
            config,
            data_dir,
        })
    }

    /// Default output location for an export file.
    pub fn export_path(&self, file_name: &str) -> PathBuf {
        PathBuf::from(&self.config.general.export_dir).join(file_name)
    }
}
