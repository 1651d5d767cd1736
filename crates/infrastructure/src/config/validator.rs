use anyhow::{bail, Result};
use domain::config::*;
use tracing::warn;

pub struct ConfigValidator;

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, config: &CrmConfig) -> Result<()> {
        self.validate_store_config(&config.store)?;
        self.validate_reporting_config(&config.reporting)?;
        Ok(())
    }

    fn validate_store_config(&self, config: &StoreConfig) -> Result<()> {
        if config.project_id.trim().is_empty() {
            bail!("store.project_id is not set (CRM_PROJECT_ID)");
        }

        if config.public_key.trim().is_empty() {
            bail!("store.public_key is not set (CRM_PUBLIC_KEY)");
        }

        let url = config.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            bail!("store.base_url must be an http(s) URL, got '{}'", config.base_url);
        }

        if url.starts_with("http://") && !(url.contains("localhost") || url.contains("127.0.0.1")) {
            warn!("store.base_url uses plain HTTP: {}", url);
        }

        if config.timeout_secs == 0 {
            bail!("store.timeout_secs must be greater than 0");
        }

        Ok(())
    }

    fn validate_reporting_config(&self, config: &ReportingConfig) -> Result<()> {
        if config.top_limit == 0 {
            bail!("reporting.top_limit must be greater than 0");
        }

        if config.recent_activity_limit == 0 {
            bail!("reporting.recent_activity_limit must be greater than 0");
        }

        Ok(())
    }
}
