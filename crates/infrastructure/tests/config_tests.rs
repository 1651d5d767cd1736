#[cfg(test)]
mod tests {
    use domain::config::*;
    use infrastructure::config::{ConfigLoader, ConfigSource, ConfigValidator};
    use serial_test::serial;
    use std::env;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use tokio::fs;

    fn isolated_loader(paths: Vec<PathBuf>) -> ConfigLoader {
        ConfigLoader::new().with_search_paths(paths).without_dotenv()
    }

    fn valid_config() -> CrmConfig {
        CrmConfig {
            store: StoreConfig {
                base_url: "https://records.example.com/api/v1".to_string(),
                project_id: "proj".to_string(),
                public_key: "key".to_string(),
                timeout_secs: 10,
            },
            ..CrmConfig::default()
        }
    }

    #[tokio::test]
    async fn test_default_config_creation() {
        let config = CrmConfig::default();

        assert_eq!(config.store.base_url, "http://localhost:8080/api/v1");
        assert_eq!(config.store.timeout_secs, 30);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.reporting.recent_days, 30);
        assert_eq!(config.reporting.top_limit, 5);
    }

    #[tokio::test]
    #[serial]
    async fn test_config_loader_from_toml() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join(".crmrc.toml");

        let toml_content = r#"
[store]
base_url = "https://records.example.com/api/v1"
project_id = "acme"
public_key = "pk-123"

[reporting]
top_limit = 3

[logging]
level = "debug"
"#;

        fs::write(&config_path, toml_content).await?;

        let loader = isolated_loader(vec![config_path.clone()]);
        let (config, source) = loader.load_with_source().await?;

        assert_eq!(source, ConfigSource::File(config_path));
        assert_eq!(config.store.project_id, "acme");
        assert_eq!(config.store.public_key, "pk-123");
        assert_eq!(config.store.timeout_secs, 30);
        assert_eq!(config.reporting.top_limit, 3);
        assert_eq!(config.reporting.recent_days, 30);
        assert_eq!(config.logging.level, "debug");

        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_config_loader_from_json() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("crm.json");

        fs::write(
            &config_path,
            r#"{"store": {"project_id": "json-proj", "timeout_secs": 5}, "logging": {"json": true}}"#,
        )
        .await?;

        let config = isolated_loader(vec![config_path]).load().await?;

        assert_eq!(config.store.project_id, "json-proj");
        assert_eq!(config.store.timeout_secs, 5);
        assert!(config.logging.json);

        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_extensionless_file_is_tried_as_toml_then_json() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join(".crmrc");
        fs::write(&config_path, r#"{"reporting": {"recent_days": 7}}"#).await?;

        let config = isolated_loader(vec![config_path]).load().await?;
        assert_eq!(config.reporting.recent_days, 7);

        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_broken_file_falls_through_to_next() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let broken = temp_dir.path().join("broken.toml");
        let good = temp_dir.path().join("good.toml");
        fs::write(&broken, "[store\nproject_id = ").await?;
        fs::write(&good, "[store]\nproject_id = \"fallback\"\n").await?;

        let config = isolated_loader(vec![broken, good]).load().await?;
        assert_eq!(config.store.project_id, "fallback");

        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_missing_files_use_defaults() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let (config, source) = isolated_loader(vec![temp_dir.path().join("nope.toml")])
            .load_with_source()
            .await?;

        assert_eq!(source, ConfigSource::Default);
        assert_eq!(config, CrmConfig::default());

        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_env_override() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("crm.toml");
        fs::write(&config_path, "[store]\nproject_id = \"from-file\"\n").await?;

        env::set_var("CRM_PROJECT_ID", "from-env");
        env::set_var("CRM_PUBLIC_KEY", "env-key");
        env::set_var("CRM_STORE_URL", "https://env.example.com/api");
        env::set_var("CRM_TIMEOUT_SECS", "12");
        env::set_var("CRM_LOG_LEVEL", "trace");
        env::set_var("CRM_LOG_JSON", "yes");
        env::set_var("CRM_RECENT_DAYS", "14");
        env::set_var("CRM_TOP_LIMIT", "8");

        let config = isolated_loader(vec![config_path]).load().await;

        for name in [
            "CRM_PROJECT_ID",
            "CRM_PUBLIC_KEY",
            "CRM_STORE_URL",
            "CRM_TIMEOUT_SECS",
            "CRM_LOG_LEVEL",
            "CRM_LOG_JSON",
            "CRM_RECENT_DAYS",
            "CRM_TOP_LIMIT",
        ] {
            env::remove_var(name);
        }

        let config = config?;
        assert_eq!(config.store.project_id, "from-env");
        assert_eq!(config.store.public_key, "env-key");
        assert_eq!(config.store.base_url, "https://env.example.com/api");
        assert_eq!(config.store.timeout_secs, 12);
        assert_eq!(config.logging.level, "trace");
        assert!(config.logging.json);
        assert_eq!(config.reporting.recent_days, 14);
        assert_eq!(config.reporting.top_limit, 8);

        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_invalid_numeric_env_is_ignored() -> anyhow::Result<()> {
        env::set_var("CRM_TIMEOUT_SECS", "soon");
        let config = isolated_loader(Vec::new()).load().await;
        env::remove_var("CRM_TIMEOUT_SECS");

        assert_eq!(config?.store.timeout_secs, 30);
        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_custom_env_prefix() -> anyhow::Result<()> {
        env::set_var("ACME_PROJECT_ID", "prefixed");
        let config = isolated_loader(Vec::new())
            .with_env_prefix("ACME_".to_string())
            .load()
            .await;
        env::remove_var("ACME_PROJECT_ID");

        assert_eq!(config?.store.project_id, "prefixed");
        Ok(())
    }

    #[tokio::test]
    async fn test_config_validation_success() {
        let validator = ConfigValidator::new();
        assert!(validator.validate(&valid_config()).is_ok());
    }

    #[tokio::test]
    async fn test_config_validation_missing_credentials() {
        let validator = ConfigValidator::new();

        let mut config = valid_config();
        config.store.project_id = "  ".to_string();
        let err = validator.validate(&config).unwrap_err();
        assert!(err.to_string().contains("project_id"));

        let mut config = valid_config();
        config.store.public_key.clear();
        let err = validator.validate(&config).unwrap_err();
        assert!(err.to_string().contains("public_key"));
    }

    #[tokio::test]
    async fn test_config_validation_bad_url_and_limits() {
        let validator = ConfigValidator::new();

        let mut config = valid_config();
        config.store.base_url = "ftp://records.example.com".to_string();
        assert!(validator.validate(&config).is_err());

        let mut config = valid_config();
        config.store.timeout_secs = 0;
        assert!(validator.validate(&config).is_err());

        let mut config = valid_config();
        config.reporting.top_limit = 0;
        assert!(validator.validate(&config).is_err());

        let mut config = valid_config();
        config.reporting.recent_activity_limit = 0;
        assert!(validator.validate(&config).is_err());
    }

    #[tokio::test]
    async fn test_save_config() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nested").join("crm.toml");

        let loader = isolated_loader(vec![config_path.clone()]);
        loader.save_config(&valid_config(), &config_path).await?;

        let content = fs::read_to_string(&config_path).await?;
        let parsed: CrmConfig = toml::from_str(&content)?;
        assert_eq!(parsed, valid_config());

        Ok(())
    }

    #[tokio::test]
    async fn test_generate_example_config() {
        let example = ConfigLoader::generate_example_config();

        assert!(example.contains("[store]"));
        assert!(example.contains("project_id"));
        assert!(example.contains("[reporting]"));
    }
}
