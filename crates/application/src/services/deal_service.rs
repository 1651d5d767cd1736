//! Deal Application Service
//!
//! CRUD over the `deal` table plus the dashboard aggregations. Aggregations
//! read a full snapshot and never fail: a store or decode error is logged
//! and the neutral value is returned instead.

use super::records::RecordTable;
use crate::ServiceResult;
use chrono::{DateTime, Utc};
use domain::entities::{Deal, DealUpdate, NewDeal, RecordId, DEAL_FIELDS};
use domain::repositories::{RecordStore, SortDirection};
use domain::services::deal_analytics;
use domain::value_objects::{DealStage, RecordKind};
use domain::{Amount, CompanyPerformance, ContactPerformance};
use std::sync::Arc;
use tracing::{error, info, instrument};

pub struct DealService {
    deals: RecordTable<Deal>,
}

impl DealService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            deals: RecordTable::new(store, RecordKind::Deal, DEAL_FIELDS),
        }
    }

    /// Every deal, ordered by name
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> ServiceResult<Vec<Deal>> {
        let query = self.deals.query().order_by("Name", SortDirection::Asc);
        self.deals.fetch(&query).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: RecordId) -> ServiceResult<Deal> {
        self.deals.get(id).await
    }

    #[instrument(skip(self, deal))]
    pub async fn create(&self, deal: &NewDeal) -> ServiceResult<Deal> {
        let record = deal.to_record(Utc::now())?;
        let created = self.deals.create(record).await?;
        info!("Created deal {}", created.id);
        Ok(created)
    }

    #[instrument(skip(self, changes))]
    pub async fn update(&self, id: RecordId, changes: &DealUpdate) -> ServiceResult<Deal> {
        let record = changes.to_record(id)?;
        self.deals.update(record).await
    }

    /// Move a deal to `stage`, stamping `stageUpdatedAt`
    #[instrument(skip(self))]
    pub async fn update_stage(&self, id: RecordId, stage: DealStage) -> ServiceResult<Deal> {
        self.update(id, &DealUpdate::stage(stage, Utc::now())).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: RecordId) -> ServiceResult<()> {
        self.deals.delete(id).await?;
        info!("Deleted deal {}", id);
        Ok(())
    }

    /// Every decodable deal; a malformed row is skipped rather than failing the whole view
    async fn snapshot(&self, operation: &str) -> Option<Vec<Deal>> {
        let query = self.deals.query().order_by("Name", SortDirection::Asc);
        match self.deals.fetch_decodable(&query).await {
            Ok(deals) => Some(deals),
            Err(e) => {
                error!("Error {}: {}", operation, e);
                None
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn by_stage(&self, stage: &DealStage) -> Vec<Deal> {
        self.snapshot("filtering deals by stage")
            .await
            .map(|deals| deal_analytics::filter_by_stage(&deals, stage).into_iter().cloned().collect())
            .unwrap_or_default()
    }

    #[instrument(skip(self))]
    pub async fn total_value(&self) -> Amount {
        self.snapshot("calculating total value")
            .await
            .map(|deals| deal_analytics::total_value(&deals))
            .unwrap_or_default()
    }

    #[instrument(skip(self))]
    pub async fn value_by_stage(&self, stage: &DealStage) -> Amount {
        self.snapshot("calculating value by stage")
            .await
            .map(|deals| deal_analytics::value_by_stage(&deals, stage))
            .unwrap_or_default()
    }

    /// Percentage of closed deals, 0..=100
    #[instrument(skip(self))]
    pub async fn win_rate(&self) -> u8 {
        self.snapshot("calculating win rate")
            .await
            .map(|deals| deal_analytics::win_rate(&deals))
            .unwrap_or_default()
    }

    pub async fn recent_deals(&self, days: u32) -> Vec<Deal> {
        self.recent_deals_at(days, Utc::now()).await
    }

    /// Deals dated on or after `now - days`
    #[instrument(skip(self))]
    pub async fn recent_deals_at(&self, days: u32, now: DateTime<Utc>) -> Vec<Deal> {
        self.snapshot("getting recent deals")
            .await
            .map(|deals| {
                deal_analytics::recent_deals(&deals, days, now)
                    .into_iter()
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Counts for lead, qualified, proposal, negotiation and closed
    #[instrument(skip(self))]
    pub async fn pipeline_data(&self) -> [usize; 5] {
        self.snapshot("getting pipeline data")
            .await
            .map(|deals| deal_analytics::pipeline_counts(&deals))
            .unwrap_or_default()
    }

    #[instrument(skip(self))]
    pub async fn top_contacts_by_value(&self, limit: usize) -> Vec<ContactPerformance> {
        self.snapshot("getting top contacts")
            .await
            .map(|deals| deal_analytics::top_contacts_by_value(&deals, limit))
            .unwrap_or_default()
    }

    #[instrument(skip(self))]
    pub async fn top_companies_by_opportunities(&self, limit: usize) -> Vec<CompanyPerformance> {
        self.snapshot("getting top companies")
            .await
            .map(|deals| deal_analytics::top_companies_by_opportunities(&deals, limit))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ServiceError;
    use chrono::TimeZone;
    use domain::errors::DomainError;
    use domain::repositories::{BatchOutcome, FieldError, RecordResult, StoreError};
    use infrastructure::InMemoryRecordStore;
    use serde_json::json;

    fn seeded_store() -> Arc<InMemoryRecordStore> {
        Arc::new(InMemoryRecordStore::new().with_records(
            RecordKind::Deal,
            vec![
                json!({"Name": "Alpha", "value": 1000, "stage": "closed", "contactName": "Ann", "companyName": "Acme", "createdAt": "2024-06-20T10:00:00Z"}),
                json!({"Name": "Beta", "value": 500, "stage": "lead", "contact": "Bob", "createdAt": "2024-04-01T10:00:00Z"}),
                json!({"Name": "Gamma", "value": 2500, "stage": "proposal", "contactName": "Ann", "companyName": "Acme", "stageUpdatedAt": "2024-06-29T08:00:00Z"}),
                json!({"Name": "Delta", "value": 0, "stage": "archived", "companyName": "Initech"}),
            ],
        ))
    }

    fn service(store: Arc<InMemoryRecordStore>) -> DealService {
        DealService::new(store)
    }

    #[tokio::test]
    async fn test_get_all_is_ordered_by_name() {
        let deals = service(seeded_store()).get_all().await.unwrap();
        let names: Vec<_> = deals.iter().filter_map(|d| d.name.as_deref()).collect();
        assert_eq!(names, vec!["Alpha", "Beta", "Delta", "Gamma"]);
    }

    #[tokio::test]
    async fn test_aggregations_over_snapshot() {
        let deals = service(seeded_store());

        assert_eq!(deals.total_value().await, 4000.0);
        assert_eq!(deals.value_by_stage(&DealStage::Closed).await, 1000.0);
        assert_eq!(deals.win_rate().await, 25);
        assert_eq!(deals.pipeline_data().await, [1, 0, 1, 0, 1]);
        assert_eq!(deals.by_stage(&DealStage::Lead).await.len(), 1);
        assert!(deals.by_stage(&DealStage::from("Lead")).await.is_empty());

        let contacts = deals.top_contacts_by_value(5).await;
        assert_eq!(contacts[0].name, "Ann");
        assert_eq!(contacts[0].total_value, 3500.0);
        assert_eq!(contacts[0].deal_count, 2);
        assert_eq!(contacts[1].company, "No company");

        let companies = deals.top_companies_by_opportunities(1).await;
        assert_eq!(companies.len(), 1);
        assert_eq!(companies[0].company, "Acme");
        assert_eq!(companies[0].opportunity_count, 2);
    }

    #[tokio::test]
    async fn test_recent_deals_use_effective_date() {
        let now = Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap();
        let recent = service(seeded_store()).recent_deals_at(30, now).await;
        let names: Vec<_> = recent.iter().filter_map(|d| d.name.as_deref()).collect();
        assert_eq!(names, vec!["Alpha", "Gamma"]);
    }

    #[tokio::test]
    async fn test_aggregations_degrade_when_store_fails() {
        let store = seeded_store();
        store.fail_with(StoreError::Transport("connection reset".to_string()));
        let deals = service(store);

        assert_eq!(deals.total_value().await, 0.0);
        assert_eq!(deals.win_rate().await, 0);
        assert_eq!(deals.pipeline_data().await, [0, 0, 0, 0, 0]);
        assert!(deals.recent_deals(30).await.is_empty());
        assert!(deals.by_stage(&DealStage::Closed).await.is_empty());
        assert!(deals.top_contacts_by_value(5).await.is_empty());
        assert!(deals.top_companies_by_opportunities(5).await.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_record_is_skipped_by_aggregations() {
        let store = seeded_store();
        store.insert(RecordKind::Deal, json!({"Name": "Broken", "value": "lots", "stage": "closed"}));
        store.insert(RecordKind::Deal, json!({"Name": "Undated", "value": 10, "stage": "lead", "createdAt": "soon"}));
        let deals = service(store);

        assert_eq!(deals.total_value().await, 4000.0);
        assert_eq!(deals.pipeline_data().await, [1, 0, 1, 0, 1]);
        assert_eq!(deals.win_rate().await, 25);

        // CRUD reads stay strict
        assert!(matches!(
            deals.get_all().await.unwrap_err(),
            ServiceError::Decode { kind: "Deal", .. }
        ));
    }

    #[tokio::test]
    async fn test_crud_errors_propagate() {
        let store = seeded_store();
        store.fail_with(StoreError::Rejected("Project suspended".to_string()));
        let err = service(store).get_all().await.unwrap_err();
        assert_eq!(err.to_string(), "Project suspended");
    }

    #[tokio::test]
    async fn test_create_writes_defaults() {
        let store = Arc::new(InMemoryRecordStore::new());
        let deals = service(store.clone());

        let created = deals
            .create(&NewDeal {
                name: Some("Renewal".to_string()),
                value: 750.0,
                contact_name: Some("Cara".to_string()),
                ..NewDeal::default()
            })
            .await
            .unwrap();

        assert_eq!(created.stage, Some(DealStage::Lead));
        assert_eq!(created.contact.as_deref(), Some("Cara"));
        assert!(created.created_at.is_some());
        assert_eq!(created.created_at, created.stage_updated_at);

        let stored = &store.records(RecordKind::Deal)[0];
        assert!(stored.get("contactId").is_none());
    }

    #[tokio::test]
    async fn test_negative_value_is_rejected_before_the_store() {
        let store = Arc::new(InMemoryRecordStore::new());
        let err = service(store.clone())
            .create(&NewDeal {
                value: -5.0,
                ..NewDeal::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Domain(DomainError::NegativeAmount { .. })));
        assert_eq!(store.request_count(), 0);
    }

    #[tokio::test]
    async fn test_update_stage_stamps_time() {
        let store = seeded_store();
        let deals = service(store);

        let updated = deals.update_stage(RecordId::new(2), DealStage::Qualified).await.unwrap();
        assert_eq!(updated.stage, Some(DealStage::Qualified));
        assert!(updated.stage_updated_at.is_some());
        assert_eq!(updated.name.as_deref(), Some("Beta"));
    }

    #[tokio::test]
    async fn test_field_rejection_surfaces_first_field_error() {
        let store = seeded_store();
        store.queue_batch_outcome(BatchOutcome {
            results: vec![RecordResult {
                errors: vec![FieldError {
                    field_label: "stage".to_string(),
                    message: "is not allowed".to_string(),
                }],
                ..RecordResult::failed("validation failed")
            }],
        });

        let err = service(store)
            .update_stage(RecordId::new(1), DealStage::from("won"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "stage: is not allowed");
    }

    #[tokio::test]
    async fn test_missing_deal_is_not_found() {
        let err = service(seeded_store()).get_by_id(RecordId::new(404)).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_missing_deal_reports_message() {
        let deals = service(seeded_store());
        deals.delete(RecordId::new(1)).await.unwrap();

        let err = deals.delete(RecordId::new(1)).await.unwrap_err();
        assert!(matches!(err, ServiceError::RecordFailed(_)));
    }
}
