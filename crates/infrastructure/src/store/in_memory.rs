//! InMemoryRecordStore - process-local `RecordStore`
//!
//! Behaves like the hosted store for the subset of queries the services
//! issue: `EqualTo` conditions, ordering, paging and field projection.
//! Failures can be injected for the whole store or for the next batch.

use async_trait::async_trait;
use domain::entities::RecordId;
use domain::repositories::{
    BatchOutcome, FetchQuery, RecordResult, RecordStore, SortDirection, StoreError, StoreResult,
};
use domain::value_objects::RecordKind;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};
use tracing::debug;

#[derive(Default)]
struct State {
    tables: HashMap<RecordKind, Vec<Value>>,
    next_id: i64,
    failure: Option<StoreError>,
    queued_outcomes: VecDeque<BatchOutcome>,
    request_count: usize,
}

impl State {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn begin_request(&mut self) -> StoreResult<()> {
        self.request_count += 1;
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
pub struct InMemoryRecordStore {
    state: Mutex<State>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed `kind` with records; records without an `Id` get one assigned
    pub fn with_records(self, kind: RecordKind, records: Vec<Value>) -> Self {
        for record in records {
            self.insert(kind, record);
        }
        self
    }

    /// Store one record as-is and return its id
    pub fn insert(&self, kind: RecordKind, mut record: Value) -> RecordId {
        let mut state = self.state.lock();
        let id = match record_id(&record) {
            Some(id) => {
                state.next_id = state.next_id.max(id);
                id
            }
            None => {
                let id = state.allocate_id();
                if let Some(object) = record.as_object_mut() {
                    object.insert("Id".to_string(), Value::from(id));
                }
                id
            }
        };
        state.tables.entry(kind).or_default().push(record);
        RecordId::new(id)
    }

    /// Fail every subsequent call with `error`
    pub fn fail_with(&self, error: StoreError) {
        self.state.lock().failure = Some(error);
    }

    pub fn clear_failure(&self) {
        self.state.lock().failure = None;
    }

    /// Answer the next create/update/delete with `outcome` without touching the tables
    pub fn queue_batch_outcome(&self, outcome: BatchOutcome) {
        self.state.lock().queued_outcomes.push_back(outcome);
    }

    /// Snapshot of the stored records of `kind`
    pub fn records(&self, kind: RecordKind) -> Vec<Value> {
        self.state.lock().tables.get(&kind).cloned().unwrap_or_default()
    }

    /// Number of calls made through the `RecordStore` interface
    pub fn request_count(&self) -> usize {
        self.state.lock().request_count
    }
}

fn record_id(record: &Value) -> Option<i64> {
    match record.get("Id")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn project(record: &Value, fields: &[String]) -> Value {
    let Some(object) = record.as_object() else {
        return record.clone();
    };
    if fields.is_empty() {
        return record.clone();
    }

    let mut projected = Map::new();
    if let Some(id) = object.get("Id") {
        projected.insert("Id".to_string(), id.clone());
    }
    for field in fields {
        if let Some(value) = object.get(field) {
            projected.insert(field.clone(), value.clone());
        }
    }
    Value::Object(projected)
}

// Missing values sort first, numbers by value, everything else as text.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn fetch_records(&self, kind: RecordKind, query: &FetchQuery) -> StoreResult<Vec<Value>> {
        let mut state = self.state.lock();
        state.begin_request()?;

        let mut records: Vec<&Value> = state
            .tables
            .get(&kind)
            .map(|rows| {
                rows.iter()
                    .filter(|row| query.conditions.iter().all(|c| c.matches(row)))
                    .collect()
            })
            .unwrap_or_default();

        for sort in query.order_by.iter().rev() {
            records.sort_by(|a, b| {
                let ordering = compare_values(a.get(&sort.field), b.get(&sort.field));
                match sort.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        let (offset, limit) = query
            .paging
            .map(|p| (p.offset, p.limit))
            .unwrap_or((0, usize::MAX));

        let page: Vec<Value> = records
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|row| project(row, &query.fields))
            .collect();

        debug!("In-memory fetch from {} returned {} records", kind, page.len());
        Ok(page)
    }

    async fn get_record_by_id(
        &self,
        kind: RecordKind,
        id: RecordId,
        fields: &'static [&'static str],
    ) -> StoreResult<Option<Value>> {
        let mut state = self.state.lock();
        state.begin_request()?;

        let fields: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
        Ok(state.tables.get(&kind).and_then(|rows| {
            rows.iter()
                .find(|row| record_id(row) == Some(id.value()))
                .map(|row| project(row, &fields))
        }))
    }

    async fn create_records(&self, kind: RecordKind, records: Vec<Value>) -> StoreResult<BatchOutcome> {
        let mut state = self.state.lock();
        state.begin_request()?;
        if let Some(outcome) = state.queued_outcomes.pop_front() {
            return Ok(outcome);
        }

        let mut results = Vec::with_capacity(records.len());
        for mut record in records {
            if !record.is_object() {
                results.push(RecordResult::failed("Record must be a JSON object"));
                continue;
            }
            let id = state.allocate_id();
            if let Some(object) = record.as_object_mut() {
                object.insert("Id".to_string(), Value::from(id));
            }
            state.tables.entry(kind).or_default().push(record.clone());
            results.push(RecordResult::ok(record));
        }

        Ok(BatchOutcome { results })
    }

    async fn update_records(&self, kind: RecordKind, records: Vec<Value>) -> StoreResult<BatchOutcome> {
        let mut state = self.state.lock();
        state.begin_request()?;
        if let Some(outcome) = state.queued_outcomes.pop_front() {
            return Ok(outcome);
        }

        let table = state.tables.entry(kind).or_default();
        let mut results = Vec::with_capacity(records.len());
        for record in records {
            let Some(id) = record_id(&record) else {
                results.push(RecordResult::failed("Record is missing its Id"));
                continue;
            };
            let Some(existing) = table.iter_mut().find(|row| record_id(row) == Some(id)) else {
                results.push(RecordResult::failed(format!("Record {} not found", id)));
                continue;
            };

            if let (Some(target), Some(changes)) = (existing.as_object_mut(), record.as_object()) {
                for (field, value) in changes {
                    target.insert(field.clone(), value.clone());
                }
            }
            results.push(RecordResult::ok(existing.clone()));
        }

        Ok(BatchOutcome { results })
    }

    async fn delete_records(&self, kind: RecordKind, ids: Vec<RecordId>) -> StoreResult<BatchOutcome> {
        let mut state = self.state.lock();
        state.begin_request()?;
        if let Some(outcome) = state.queued_outcomes.pop_front() {
            return Ok(outcome);
        }

        let table = state.tables.entry(kind).or_default();
        let results = ids
            .into_iter()
            .map(|id| match table.iter().position(|row| record_id(row) == Some(id.value())) {
                Some(index) => {
                    table.remove(index);
                    RecordResult {
                        success: true,
                        data: None,
                        message: None,
                        errors: Vec::new(),
                    }
                }
                None => RecordResult::failed(format!("Record {} not found", id)),
            })
            .collect();

        Ok(BatchOutcome { results })
    }
}
