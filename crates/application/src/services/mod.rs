//! Application Services
//!
//! One service per record kind, all sharing the injected `RecordStore`.

mod activity_service;
mod company_service;
mod contact_service;
mod crm;
mod deal_service;
mod records;

pub use activity_service::{ActivityService, DEFAULT_RECENT_ACTIVITY_LIMIT};
pub use company_service::CompanyService;
pub use contact_service::ContactService;
pub use crm::CrmServices;
pub use deal_service::DealService;
