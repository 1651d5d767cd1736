//! RecordKind - named collections in the record store

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    Deal,
    Contact,
    Company,
    Activity,
}

impl RecordKind {
    /// Table name used by the store
    pub fn table(&self) -> &'static str {
        match self {
            RecordKind::Deal => "deal",
            RecordKind::Contact => "app_contact",
            RecordKind::Company => "company",
            RecordKind::Activity => "app_Activity",
        }
    }

    /// Human-readable singular name for messages
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Deal => "Deal",
            RecordKind::Contact => "Contact",
            RecordKind::Company => "Company",
            RecordKind::Activity => "Activity",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}
