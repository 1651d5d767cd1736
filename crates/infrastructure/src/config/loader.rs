use anyhow::{Context, Result};
use domain::config::*;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tokio::fs;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),
    Default,
}

pub struct ConfigLoader {
    config_paths: Vec<PathBuf>,
    env_prefix: String,
    load_dotenv: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config_paths: Self::default_config_paths(),
            env_prefix: "CRM_".to_string(),
            load_dotenv: true,
        }
    }

    /// Check `path` before the default locations
    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.config_paths.insert(0, path);
        self
    }

    /// Replace the search list entirely
    pub fn with_search_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.config_paths = paths;
        self
    }

    pub fn with_env_prefix(mut self, prefix: String) -> Self {
        self.env_prefix = prefix;
        self
    }

    /// Skip reading `.env` from the working directory
    pub fn without_dotenv(mut self) -> Self {
        self.load_dotenv = false;
        self
    }

    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".crmrc"),
            PathBuf::from(".crmrc.toml"),
            PathBuf::from(".crmrc.json"),
            PathBuf::from("crm.toml"),
            PathBuf::from("crm.json"),
        ];

        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".config").join("crm").join("config.toml"));
            paths.push(home_dir.join(".config").join("crm").join("config.json"));
        }

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("crm").join("config.toml"));
            paths.push(config_dir.join("crm").join("config.json"));
        }

        paths
    }

    /// Defaults, then the first config file found, then environment overrides
    pub async fn load(&self) -> Result<CrmConfig> {
        Ok(self.load_with_source().await?.0)
    }

    pub async fn load_with_source(&self) -> Result<(CrmConfig, ConfigSource)> {
        if self.load_dotenv {
            // A missing .env is normal
            dotenv::dotenv().ok();
        }

        let (config, source) = self.load_base_config().await?;
        let config = self.apply_env_overrides(config);

        Ok((config, source))
    }

    async fn load_base_config(&self) -> Result<(CrmConfig, ConfigSource)> {
        for path in &self.config_paths {
            if !path.exists() {
                continue;
            }
            debug!("Found config file: {}", path.display());
            match self.load_file(path).await {
                Ok(file_config) => {
                    info!("Loaded configuration from: {}", path.display());
                    return Ok((file_config, ConfigSource::File(path.clone())));
                }
                Err(e) => {
                    warn!("Failed to load config from {}: {:#}", path.display(), e);
                }
            }
        }

        debug!("No config file found, using defaults");
        Ok((CrmConfig::default(), ConfigSource::Default))
    }

    async fn load_file(&self, path: &Path) -> Result<CrmConfig> {
        let content = fs::read_to_string(path)
            .await
            .context("Failed to read config file")?;

        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

        match extension {
            "toml" => toml::from_str(&content).context("Failed to parse TOML config"),
            "json" => serde_json::from_str(&content).context("Failed to parse JSON config"),
            _ => {
                // Try TOML first, then JSON
                toml::from_str(&content)
                    .or_else(|_| serde_json::from_str(&content))
                    .context("Failed to parse config file")
            }
        }
    }

    fn env_var(&self, name: &str) -> Option<String> {
        env::var(format!("{}{}", self.env_prefix, name))
            .ok()
            .filter(|value| !value.trim().is_empty())
    }

    fn env_parsed<T: FromStr>(&self, name: &str) -> Option<T> {
        let raw = self.env_var(name)?;
        match raw.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring {}{}: '{}' is not a valid value", self.env_prefix, name, raw);
                None
            }
        }
    }

    fn apply_env_overrides(&self, mut config: CrmConfig) -> CrmConfig {
        // Store connection
        if let Some(url) = self.env_var("STORE_URL") {
            config.store.base_url = url;
        }
        if let Some(project_id) = self.env_var("PROJECT_ID") {
            config.store.project_id = project_id;
        }
        if let Some(public_key) = self.env_var("PUBLIC_KEY") {
            config.store.public_key = public_key;
        }
        if let Some(timeout) = self.env_parsed("TIMEOUT_SECS") {
            config.store.timeout_secs = timeout;
        }

        // Logging settings
        if let Some(level) = self.env_var("LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Some(json) = self.env_var("LOG_JSON") {
            config.logging.json = matches!(json.to_lowercase().as_str(), "true" | "1" | "yes");
        }

        // Reporting defaults
        if let Some(days) = self.env_parsed("RECENT_DAYS") {
            config.reporting.recent_days = days;
        }
        if let Some(limit) = self.env_parsed("TOP_LIMIT") {
            config.reporting.top_limit = limit;
        }

        config
    }

    pub async fn save_config(&self, config: &CrmConfig, path: &Path) -> Result<()> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("toml");

        let content = match extension {
            "json" => serde_json::to_string_pretty(config)?,
            _ => toml::to_string_pretty(config)?,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(path, content).await?;
        info!("Configuration saved to: {}", path.display());

        Ok(())
    }

    pub fn generate_example_config() -> String {
        let config = CrmConfig {
            store: StoreConfig {
                base_url: "https://records.example.com/api/v1".to_string(),
                project_id: "your-project-id".to_string(),
                public_key: "your-public-key".to_string(),
                ..StoreConfig::default()
            },
            ..CrmConfig::default()
        };

        toml::to_string_pretty(&config)
            .unwrap_or_else(|_| "# Failed to generate example config".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_config_parses_back() {
        let example = ConfigLoader::generate_example_config();
        let parsed: CrmConfig = toml::from_str(&example).unwrap();
        assert_eq!(parsed.store.project_id, "your-project-id");
        assert_eq!(parsed.reporting, ReportingConfig::default());
    }
}
