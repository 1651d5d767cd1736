//! Contact Application Service

use super::activity_service::entity_query;
use super::records::RecordTable;
use crate::ServiceResult;
use chrono::Utc;
use domain::entities::{Activity, Contact, ContactDraft, RecordId, ACTIVITY_FIELDS, CONTACT_FIELDS};
use domain::repositories::{RecordStore, SortDirection};
use domain::services::contact_search;
use domain::value_objects::{EntityType, RecordKind};
use std::sync::Arc;
use tracing::{error, info, instrument};

pub struct ContactService {
    contacts: RecordTable<Contact>,
    activities: RecordTable<Activity>,
}

impl ContactService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            contacts: RecordTable::new(store.clone(), RecordKind::Contact, CONTACT_FIELDS),
            activities: RecordTable::new(store, RecordKind::Activity, ACTIVITY_FIELDS),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> ServiceResult<Vec<Contact>> {
        let query = self.contacts.query().order_by("Name", SortDirection::Asc);
        self.contacts.fetch(&query).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: RecordId) -> ServiceResult<Contact> {
        self.contacts.get(id).await
    }

    #[instrument(skip(self, draft))]
    pub async fn create(&self, draft: &ContactDraft) -> ServiceResult<Contact> {
        let record = draft.to_create_record(Utc::now().date_naive());
        let created = self.contacts.create(record).await?;
        info!("Created contact {}", created.id);
        Ok(created)
    }

    /// Rewrites every editable field from `draft`
    #[instrument(skip(self, draft))]
    pub async fn update(&self, id: RecordId, draft: &ContactDraft) -> ServiceResult<Contact> {
        let record = draft.to_update_record(id, Utc::now().date_naive());
        self.contacts.update(record).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: RecordId) -> ServiceResult<()> {
        self.contacts.delete(id).await
    }

    /// Contacts matching `query` on name, email, company or phone
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> ServiceResult<Vec<Contact>> {
        let contacts = self.get_all().await?;
        Ok(contact_search::search(&contacts, query).into_iter().cloned().collect())
    }

    /// Activity timeline of one contact; empty when the store fails
    #[instrument(skip(self))]
    pub async fn get_activities(&self, id: RecordId) -> Vec<Activity> {
        let query = entity_query(&self.activities, EntityType::Contact, id);
        match self.activities.fetch(&query).await {
            Ok(activities) => activities,
            Err(e) => {
                error!("Error fetching activities for contact {}: {}", id, e);
                Vec::new()
            }
        }
    }

    /// Number of stored contacts; 0 when the store fails
    #[instrument(skip(self))]
    pub async fn get_total_count(&self) -> usize {
        match self.contacts.fetch(&self.contacts.query()).await {
            Ok(contacts) => contacts.len(),
            Err(e) => {
                error!("Error getting {} count: {}", self.contacts.kind().label(), e);
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::repositories::StoreError;
    use infrastructure::InMemoryRecordStore;
    use serde_json::json;

    fn store() -> Arc<InMemoryRecordStore> {
        Arc::new(
            InMemoryRecordStore::new()
                .with_records(
                    RecordKind::Contact,
                    vec![
                        json!({"Name": "Zoe Park", "email": "zoe@globex.com", "companyName": "Globex", "phone": "555-0100"}),
                        json!({"Name": "Adam Stone", "email": "adam@acme.io", "companyName": "Acme", "phone": "555-0199"}),
                    ],
                )
                .with_records(
                    RecordKind::Activity,
                    vec![
                        json!({"Name": "Intro call", "type": "call", "date": "2024-05-01T09:00:00Z", "entityType": "contact", "entityId": 1}),
                        json!({"Name": "Follow up", "type": "email", "date": "2024-05-03T09:00:00Z", "entityType": "contact", "entityId": 1}),
                        json!({"Name": "Other", "type": "note", "date": "2024-05-04T09:00:00Z", "entityType": "company", "entityId": 1}),
                    ],
                ),
        )
    }

    #[tokio::test]
    async fn test_search_matches_company_and_phone() {
        let contacts = ContactService::new(store());

        let by_company = contacts.search("ACME").await.unwrap();
        assert_eq!(by_company.len(), 1);
        assert_eq!(by_company[0].name.as_deref(), Some("Adam Stone"));

        let by_phone = contacts.search(" 0100 ").await.unwrap();
        assert_eq!(by_phone[0].name.as_deref(), Some("Zoe Park"));

        assert_eq!(contacts.search("   ").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_search_propagates_store_errors() {
        let store = store();
        store.fail_with(StoreError::Transport("timeout".to_string()));
        assert!(ContactService::new(store).search("a").await.is_err());
    }

    #[tokio::test]
    async fn test_activities_are_newest_first_for_that_contact() {
        let activities = ContactService::new(store()).get_activities(RecordId::new(1)).await;
        let names: Vec<_> = activities.iter().filter_map(|a| a.name.as_deref()).collect();
        assert_eq!(names, vec!["Follow up", "Intro call"]);
    }

    #[tokio::test]
    async fn test_degrading_reads() {
        let store = store();
        let contacts = ContactService::new(store.clone());
        assert_eq!(contacts.get_total_count().await, 2);

        store.fail_with(StoreError::Http {
            status: 503,
            message: "maintenance".to_string(),
        });
        assert_eq!(contacts.get_total_count().await, 0);
        assert!(contacts.get_activities(RecordId::new(1)).await.is_empty());
    }

    #[tokio::test]
    async fn test_create_builds_name_from_parts() {
        let store = Arc::new(InMemoryRecordStore::new());
        let contacts = ContactService::new(store.clone());

        let created = contacts
            .create(&ContactDraft {
                first_name: Some("Lena".to_string()),
                last_name: Some("Ortiz".to_string()),
                company: Some("Hooli".to_string()),
                ..ContactDraft::default()
            })
            .await
            .unwrap();

        assert_eq!(created.name.as_deref(), Some("Lena Ortiz"));
        assert_eq!(created.company_name.as_deref(), Some("Hooli"));
        assert!(created.created_at.is_some());
        assert!(created.last_contact_date.is_some());
    }

    #[tokio::test]
    async fn test_update_replaces_editable_fields() {
        let contacts = ContactService::new(store());
        let updated = contacts
            .update(
                RecordId::new(2),
                &ContactDraft {
                    name: Some("Adam S.".to_string()),
                    email: Some("adam@initech.com".to_string()),
                    ..ContactDraft::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name.as_deref(), Some("Adam S."));
        assert_eq!(updated.email.as_deref(), Some("adam@initech.com"));
        assert_eq!(updated.company_name, None);
    }
}
