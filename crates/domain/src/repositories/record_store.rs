//! RecordStore - Domain abstraction for the hosted record store
//!
//! Records travel as JSON objects; entities decode them at the boundary.

use super::query::FetchQuery;
use crate::entities::RecordId;
use crate::value_objects::RecordKind;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Failures reported by a record store implementation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The store answered with `success: false`
    #[error("{0}")]
    Rejected(String),

    /// The request never produced a response
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-success HTTP status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The response body did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Field-level validation failure reported for one record of a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(rename = "fieldLabel", default)]
    pub field_label: String,
    #[serde(default)]
    pub message: String,
}

/// Outcome of one record within a create/update/delete batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl RecordResult {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            errors: Vec::new(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            errors: Vec::new(),
        }
    }
}

/// Per-record results of a batch mutation that the store accepted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    #[serde(default)]
    pub results: Vec<RecordResult>,
}

impl BatchOutcome {
    pub fn failed(&self) -> impl Iterator<Item = &RecordResult> {
        self.results.iter().filter(|r| !r.success)
    }

    pub fn failed_count(&self) -> usize {
        self.failed().count()
    }

    /// Data of the first successful record
    pub fn first_success(&self) -> Option<&Value> {
        self.results
            .iter()
            .filter(|r| r.success)
            .find_map(|r| r.data.as_ref())
    }
}

/// Repository abstraction over the hosted record store
///
/// Implementations map transport and envelope failures to `StoreError`;
/// per-record batch failures are returned inside `BatchOutcome`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch every record of `kind` matching the query
    async fn fetch_records(&self, kind: RecordKind, query: &FetchQuery) -> StoreResult<Vec<Value>>;

    /// Fetch one record; `None` when the store has no such id
    ///
    /// Field lists are the per-entity constants, hence `'static`.
    async fn get_record_by_id(
        &self,
        kind: RecordKind,
        id: RecordId,
        fields: &'static [&'static str],
    ) -> StoreResult<Option<Value>>;

    async fn create_records(&self, kind: RecordKind, records: Vec<Value>) -> StoreResult<BatchOutcome>;

    /// Each record must carry its `Id`
    async fn update_records(&self, kind: RecordKind, records: Vec<Value>) -> StoreResult<BatchOutcome>;

    async fn delete_records(&self, kind: RecordKind, ids: Vec<RecordId>) -> StoreResult<BatchOutcome>;
}
