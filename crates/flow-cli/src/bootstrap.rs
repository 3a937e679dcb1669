use flow_config::FlowConfig;

/// Load `.env` from the working directory, then the layered configuration.
pub fn load_config() -> anyhow::Result<FlowConfig> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded dotenv file"),
        Err(error) if error.not_found() => {}
        Err(error) => return Err(anyhow::anyhow!("failed to load .env: {error}")),
    }
    FlowConfig::load().map_err(anyhow::Error::from)
}
