use super::{ActivityService, CompanyService, ContactService, DealService};
use domain::repositories::RecordStore;
use std::sync::Arc;

/// All CRM services over one shared store
pub struct CrmServices {
    pub deals: DealService,
    pub contacts: ContactService,
    pub companies: CompanyService,
    pub activities: ActivityService,
}

impl CrmServices {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            deals: DealService::new(store.clone()),
            contacts: ContactService::new(store.clone()),
            companies: CompanyService::new(store.clone()),
            activities: ActivityService::new(store),
        }
    }
}
