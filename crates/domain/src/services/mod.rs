//! Domain Services - Pure computations over fetched records
//!
//! No I/O: callers fetch a full snapshot and pass it in. Nothing here
//! mutates its input.

pub mod contact_search;
pub mod deal_analytics;

pub use deal_analytics::{CompanyPerformance, ContactPerformance};
