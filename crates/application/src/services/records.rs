//! Typed access to one table of the record store

use crate::{ServiceError, ServiceResult};
use domain::entities::RecordId;
use domain::repositories::{BatchOutcome, FetchQuery, RecordStore};
use domain::value_objects::RecordKind;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Which per-record failures a batch check reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BatchCheck {
    /// Field errors first, then the record message
    FieldsAndMessages,
    /// Record messages only
    MessagesOnly,
}

/// First error wins: the first failed record that carries a field error or a
/// message decides the error; failed records with neither are skipped.
pub(crate) fn first_failure(
    kind: RecordKind,
    action: &str,
    outcome: &BatchOutcome,
    check: BatchCheck,
) -> Option<ServiceError> {
    let failed_count = outcome.failed_count();
    if failed_count == 0 {
        return None;
    }
    error!(
        "Failed to {} {} {} record(s)",
        action,
        failed_count,
        kind.label()
    );

    outcome.failed().find_map(|record| {
        if check == BatchCheck::FieldsAndMessages {
            if let Some(field_error) = record.errors.first() {
                return Some(ServiceError::FieldRejected {
                    field: field_error.field_label.clone(),
                    message: field_error.message.clone(),
                });
            }
        }
        record.message.clone().map(ServiceError::RecordFailed)
    })
}

pub(crate) struct RecordTable<T> {
    store: Arc<dyn RecordStore>,
    kind: RecordKind,
    fields: &'static [&'static str],
    _entity: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> RecordTable<T> {
    pub(crate) fn new(store: Arc<dyn RecordStore>, kind: RecordKind, fields: &'static [&'static str]) -> Self {
        Self {
            store,
            kind,
            fields,
            _entity: PhantomData,
        }
    }

    pub(crate) fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Query selecting the entity's full field list
    pub(crate) fn query(&self) -> FetchQuery {
        FetchQuery::new(self.fields)
    }

    pub(crate) fn decode(&self, record: Value) -> ServiceResult<T> {
        serde_json::from_value(record).map_err(|e| ServiceError::Decode {
            kind: self.kind.label(),
            message: e.to_string(),
        })
    }

    pub(crate) async fn fetch(&self, query: &FetchQuery) -> ServiceResult<Vec<T>> {
        let records = self.store.fetch_records(self.kind, query).await?;
        debug!("Fetched {} {} records", records.len(), self.kind.label());
        records.into_iter().map(|record| self.decode(record)).collect()
    }

    /// Like `fetch`, but rows that fail to decode are logged and skipped
    pub(crate) async fn fetch_decodable(&self, query: &FetchQuery) -> ServiceResult<Vec<T>> {
        let records = self.store.fetch_records(self.kind, query).await?;
        let total = records.len();
        let decoded: Vec<T> = records
            .into_iter()
            .filter_map(|record| {
                let id = record.get("Id").cloned().unwrap_or(Value::Null);
                match self.decode(record) {
                    Ok(entity) => Some(entity),
                    Err(e) => {
                        warn!("Skipping {} record {}: {}", self.kind.label(), id, e);
                        None
                    }
                }
            })
            .collect();
        debug!("Decoded {} of {} {} records", decoded.len(), total, self.kind.label());
        Ok(decoded)
    }

    pub(crate) async fn get(&self, id: RecordId) -> ServiceResult<T> {
        match self.store.get_record_by_id(self.kind, id, self.fields).await? {
            Some(record) => self.decode(record),
            None => Err(ServiceError::not_found(self.kind.label(), id)),
        }
    }

    pub(crate) async fn create(&self, record: Value) -> ServiceResult<T> {
        let outcome = self.store.create_records(self.kind, vec![record]).await?;
        self.single_result("create", outcome)
    }

    pub(crate) async fn update(&self, record: Value) -> ServiceResult<T> {
        let outcome = self.store.update_records(self.kind, vec![record]).await?;
        self.single_result("update", outcome)
    }

    pub(crate) async fn delete(&self, id: RecordId) -> ServiceResult<()> {
        let outcome = self.store.delete_records(self.kind, vec![id]).await?;
        match first_failure(self.kind, "delete", &outcome, BatchCheck::MessagesOnly) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn single_result(&self, action: &str, outcome: BatchOutcome) -> ServiceResult<T> {
        if let Some(err) = first_failure(self.kind, action, &outcome, BatchCheck::FieldsAndMessages) {
            return Err(err);
        }
        match outcome.first_success() {
            Some(data) => self.decode(data.clone()),
            None => Err(ServiceError::EmptyResult(self.kind.label())),
        }
    }
}
