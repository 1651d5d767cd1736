mod activities;
mod companies;
mod config;
mod contacts;
mod deals;

pub use activities::ActivitiesCommand;
pub use companies::CompaniesCommand;
pub use config::ConfigCommand;
pub use contacts::ContactsCommand;
pub use deals::DealsCommand;

use crate::progress::{ProgressType, StoreSpinner};
use anyhow::Result;
use application::CrmServices;
use domain::config::{CrmConfig, ReportingConfig};
use domain::entities::RecordId;
use domain::value_objects::RecordKind;
use infrastructure::config::ConfigValidator;
use infrastructure::HttpRecordStore;
use std::sync::Arc;
use tracing::debug;

/// Everything a store-backed command needs
pub struct CrmApp {
    pub services: CrmServices,
    pub reporting: ReportingConfig,
    pub json: bool,
}

impl CrmApp {
    /// Validate the configuration and build the services over the HTTP store
    pub fn connect(config: &CrmConfig, json: bool) -> Result<Self> {
        ConfigValidator::new().validate(config)?;
        let store = HttpRecordStore::new(&config.store)?;
        debug!("Using record store at {}", config.store.base_url);

        Ok(Self {
            services: CrmServices::new(Arc::new(store)),
            reporting: config.reporting.clone(),
            json,
        })
    }

    pub fn spinner(&self, kind: ProgressType, message: &str) -> StoreSpinner {
        kind.spinner(message, self.json)
    }
}

/// Parse a user-supplied id for `kind`
pub fn parse_id(kind: RecordKind, raw: &str) -> Result<RecordId> {
    Ok(RecordId::parse(kind.label(), raw)?)
}
