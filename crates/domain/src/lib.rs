//! Domain Layer - CRM records and reporting rules
//!
//! Contains ONLY business logic, without dependencies on:
//! - Infrastructure (HTTP clients, file systems, environment)
//! - Frameworks (CLI, logging subscribers)
//! - The hosted record store itself (reached through the `RecordStore` port)
//!
//! Layout:
//! - Entities: typed records decoded at the boundary (Deal, Contact, Company, Activity)
//! - Value Objects: closed vocabularies (DealStage, ActivityType, EntityType, Industry)
//! - Repository Abstractions: the `RecordStore` port and its query/batch types
//! - Services: pure computations over already-fetched records

pub mod config;
pub mod entities;
pub mod errors;
pub mod repositories;
pub mod services;
pub mod value_objects;

// Re-export core domain types
pub use config::CrmConfig;
pub use entities::{Activity, Company, Contact, Deal, RecordId};
pub use errors::{DomainError, DomainResult};
pub use repositories::{
    BatchOutcome, Condition, FetchQuery, FieldError, RecordResult, RecordStore, SortDirection,
    StoreError, StoreResult,
};
pub use services::{CompanyPerformance, ContactPerformance};
pub use value_objects::{ActivityType, DealStage, EntityType, Industry, RecordKind};

/// Monetary amounts as delivered by the store
pub type Amount = f64;
