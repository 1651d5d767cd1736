//! Repository Abstractions - Ports for Infrastructure Layer
//!
//! Defines the contract between the domain and the hosted record store.
//! Follows Dependency Inversion: infrastructure implements, services consume.

mod query;
mod record_store;

pub use query::{Condition, FetchQuery, Operator, Paging, SortDirection, SortSpec};
pub use record_store::{BatchOutcome, FieldError, RecordResult, RecordStore, StoreError, StoreResult};
