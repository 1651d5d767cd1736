//! Domain Entities - typed CRM records
//!
//! Each entity decodes from the store's JSON shape at the boundary and
//! carries the payload builders used when writing it back.

mod activity;
mod company;
mod contact;
mod deal;
pub mod fields;
pub mod record_id;

pub use activity::{Activity, ActivityUpdate, NewActivity, ACTIVITY_FIELDS};
pub use company::{Company, CompanyDraft, COMPANY_FIELDS};
pub use contact::{Contact, ContactDraft, CONTACT_FIELDS};
pub use deal::{Deal, DealUpdate, NewDeal, DEAL_FIELDS};
pub use record_id::RecordId;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Timestamp format written to the store (millisecond precision, `Z` suffix)
pub(crate) fn iso_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Calendar date format written to the store
pub(crate) fn iso_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
