//! RecordId - Identifier assigned by the record store
//!
//! Value object representing record identity in domain

use crate::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer identifier of a stored record
///
/// The store hands out positive integers; anything else coming from user
/// input is rejected before a request is made.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Parse an id supplied as text (CLI arguments, foreign-key fields)
    ///
    /// `kind` names the record type in the error message.
    pub fn parse(kind: &'static str, value: &str) -> DomainResult<Self> {
        value
            .trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| DomainError::InvalidRecordId {
                kind,
                value: value.to_string(),
            })
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}
