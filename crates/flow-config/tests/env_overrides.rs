use figment::Jail;
use flow_config::FlowConfig;

#[test]
fn env_overrides_nested_keys() {
    Jail::expect_with(|jail| {
        jail.set_env("AUDITFLOW_STORAGE__DATA_DIR", "/tmp/flow-data");
        jail.set_env("AUDITFLOW_STORAGE__TRAIL", "false");

        let config = FlowConfig::load().expect("config loads");
        assert_eq!(config.storage.data_dir, "/tmp/flow-data");
        assert!(!config.storage.trail);
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".auditflow")?;
        jail.create_file(
            ".auditflow/config.toml",
            "[general]\ndefault_limit = 5\n",
        )?;
        jail.set_env("AUDITFLOW_GENERAL__DEFAULT_LIMIT", "7");

        let config = FlowConfig::load().expect("config loads");
        assert_eq!(config.general.default_limit, 7);
        Ok(())
    });
}

#[test]
fn zero_limit_from_env_fails_validation() {
    Jail::expect_with(|jail| {
        jail.set_env("AUDITFLOW_GENERAL__DEFAULT_LIMIT", "0");
        assert!(FlowConfig::load().is_err());
        Ok(())
    });
}
