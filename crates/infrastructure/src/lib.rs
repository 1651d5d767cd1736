//! Infrastructure Layer - configuration and record store adapters
//!
//! Implements the domain's `RecordStore` port over HTTP and in memory, and
//! loads `CrmConfig` from files and the environment.

pub mod config;
pub mod store;

pub use config::{ConfigLoader, ConfigSource, ConfigValidator};
pub use store::{HttpRecordStore, InMemoryRecordStore};
