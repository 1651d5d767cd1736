//! HttpRecordStore - `RecordStore` over the hosted store's REST API

use async_trait::async_trait;
use common::OperationTimer;
use domain::config::StoreConfig;
use domain::entities::RecordId;
use domain::repositories::{BatchOutcome, FetchQuery, RecordResult, RecordStore, StoreError, StoreResult};
use domain::value_objects::RecordKind;
use reqwest::{Client, Method, RequestBuilder};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, error, instrument};

const PROJECT_HEADER: &str = "X-Project-Id";
const KEY_HEADER: &str = "X-Public-Key";

/// Response wrapper shared by every endpoint
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    results: Option<Vec<RecordResult>>,
}

fn default_success() -> bool {
    true
}

pub struct HttpRecordStore {
    client: Client,
    base_url: String,
    project_id: String,
    public_key: String,
}

impl HttpRecordStore {
    pub fn new(config: &StoreConfig) -> StoreResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            project_id: config.project_id.clone(),
            public_key: config.public_key.clone(),
        })
    }

    fn records_url(&self, kind: RecordKind) -> String {
        format!("{}/tables/{}/records", self.base_url, kind.table())
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(PROJECT_HEADER, &self.project_id)
            .header(KEY_HEADER, &self.public_key)
    }

    /// Send `body` and unwrap the envelope
    async fn send(&self, method: Method, url: String, body: Value) -> StoreResult<Envelope> {
        let mut timer = OperationTimer::new("record_store_request");
        timer.add_field("method", method.as_str());
        timer.add_field("url", &url);

        let result = self.send_inner(method, &url, body).await;
        timer.finish_with_result(&result);
        result
    }

    async fn send_inner(&self, method: Method, url: &str, body: Value) -> StoreResult<Envelope> {
        let response = self
            .request(method, url)
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<Envelope>(&text)
                .ok()
                .and_then(|envelope| envelope.message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });
            error!("Record store returned {}: {}", status, message);
            return Err(StoreError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: Envelope = serde_json::from_str(&text)
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;

        if !envelope.success {
            let message = envelope
                .message
                .unwrap_or_else(|| "Request rejected by record store".to_string());
            error!("Record store rejected request: {}", message);
            return Err(StoreError::Rejected(message));
        }

        Ok(envelope)
    }

    fn batch(envelope: Envelope) -> BatchOutcome {
        BatchOutcome {
            results: envelope.results.unwrap_or_default(),
        }
    }
}

fn field_refs(fields: &[&str]) -> Value {
    Value::Array(
        fields
            .iter()
            .map(|name| json!({ "field": { "Name": name } }))
            .collect(),
    )
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    #[instrument(skip(self, query), fields(table = kind.table()))]
    async fn fetch_records(&self, kind: RecordKind, query: &FetchQuery) -> StoreResult<Vec<Value>> {
        let body = serde_json::to_value(query).map_err(|e| StoreError::InvalidResponse(e.to_string()))?;
        let url = format!("{}/query", self.records_url(kind));
        let envelope = self.send(Method::POST, url, body).await?;

        match envelope.data {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(records)) => {
                debug!("Fetched {} records", records.len());
                Ok(records)
            }
            Some(other) => Err(StoreError::InvalidResponse(format!(
                "expected a list of records, got {}",
                other
            ))),
        }
    }

    #[instrument(skip(self, fields), fields(table = kind.table()))]
    async fn get_record_by_id(
        &self,
        kind: RecordKind,
        id: RecordId,
        fields: &'static [&'static str],
    ) -> StoreResult<Option<Value>> {
        let url = format!("{}/{}/query", self.records_url(kind), id);
        let envelope = self
            .send(Method::POST, url, json!({ "fields": field_refs(fields) }))
            .await?;

        Ok(envelope.data.filter(|data| !data.is_null()))
    }

    #[instrument(skip(self, records), fields(table = kind.table(), count = records.len()))]
    async fn create_records(&self, kind: RecordKind, records: Vec<Value>) -> StoreResult<BatchOutcome> {
        let envelope = self
            .send(Method::POST, self.records_url(kind), json!({ "records": records }))
            .await?;
        Ok(Self::batch(envelope))
    }

    #[instrument(skip(self, records), fields(table = kind.table(), count = records.len()))]
    async fn update_records(&self, kind: RecordKind, records: Vec<Value>) -> StoreResult<BatchOutcome> {
        let envelope = self
            .send(Method::PUT, self.records_url(kind), json!({ "records": records }))
            .await?;
        Ok(Self::batch(envelope))
    }

    #[instrument(skip(self, ids), fields(table = kind.table(), count = ids.len()))]
    async fn delete_records(&self, kind: RecordKind, ids: Vec<RecordId>) -> StoreResult<BatchOutcome> {
        let envelope = self
            .send(Method::DELETE, self.records_url(kind), json!({ "RecordIds": ids }))
            .await?;
        Ok(Self::batch(envelope))
    }
}
