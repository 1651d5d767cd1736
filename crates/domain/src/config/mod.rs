use serde::{Deserialize, Serialize};

use crate::services::deal_analytics::{DEFAULT_RECENT_DAYS, DEFAULT_TOP_LIMIT};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CrmConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub logging: LoggingSettings,

    #[serde(default)]
    pub reporting: ReportingConfig,
}

/// Connection settings for the hosted record store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Project the records belong to
    #[serde(default)]
    pub project_id: String,

    /// Client key sent with every request
    #[serde(default)]
    pub public_key: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// One JSON object per line instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

/// Defaults for the dashboard views
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportingConfig {
    #[serde(default = "default_recent_days")]
    pub recent_days: u32,

    #[serde(default = "default_top_limit")]
    pub top_limit: usize,

    #[serde(default = "default_recent_activity_limit")]
    pub recent_activity_limit: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            project_id: String::new(),
            public_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            recent_days: default_recent_days(),
            top_limit: default_top_limit(),
            recent_activity_limit: default_recent_activity_limit(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080/api/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_recent_days() -> u32 {
    DEFAULT_RECENT_DAYS
}

fn default_top_limit() -> usize {
    DEFAULT_TOP_LIMIT
}

fn default_recent_activity_limit() -> usize {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: CrmConfig = serde_json::from_str(
            r#"{"store": {"project_id": "p-1", "public_key": "k"}, "reporting": {"top_limit": 3}}"#,
        )
        .unwrap();

        assert_eq!(config.store.project_id, "p-1");
        assert_eq!(config.store.timeout_secs, 30);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.reporting.top_limit, 3);
        assert_eq!(config.reporting.recent_days, 30);
        assert_eq!(config.reporting.recent_activity_limit, 10);
    }
}
