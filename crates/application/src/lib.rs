//! # Application Layer
//!
//! Services that turn store records into typed CRM entities:
//! - CRUD per entity kind, with first-error-wins batch handling
//! - Deal aggregations that degrade to defaults when the store fails
//! - Contact search and activity timelines
//!
//! ## Dependency Direction
//!
//! ```text
//! Application Layer → Domain Layer (entities, services, RecordStore port)
//! Infrastructure → Domain Layer (implements RecordStore)
//! ```

pub mod errors;
pub mod services;

pub use errors::{ServiceError, ServiceResult};
pub use services::{ActivityService, CompanyService, ContactService, CrmServices, DealService};
