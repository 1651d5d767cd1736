//! Company Application Service

use super::records::RecordTable;
use crate::ServiceResult;
use domain::entities::{Company, CompanyDraft, RecordId, COMPANY_FIELDS};
use domain::repositories::{RecordStore, SortDirection};
use domain::value_objects::{Industry, RecordKind};
use std::sync::Arc;
use tracing::{info, instrument};

pub struct CompanyService {
    companies: RecordTable<Company>,
}

impl CompanyService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            companies: RecordTable::new(store, RecordKind::Company, COMPANY_FIELDS),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> ServiceResult<Vec<Company>> {
        let query = self.companies.query().order_by("Name", SortDirection::Asc);
        self.companies.fetch(&query).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: RecordId) -> ServiceResult<Company> {
        self.companies.get(id).await
    }

    #[instrument(skip(self, draft))]
    pub async fn create(&self, draft: &CompanyDraft) -> ServiceResult<Company> {
        let created = self.companies.create(draft.to_create_record()).await?;
        info!("Created company {}", created.id);
        Ok(created)
    }

    #[instrument(skip(self, draft))]
    pub async fn update(&self, id: RecordId, draft: &CompanyDraft) -> ServiceResult<Company> {
        self.companies.update(draft.to_update_record(id)).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: RecordId) -> ServiceResult<()> {
        self.companies.delete(id).await
    }

    /// Industries a company can be filed under
    pub fn industry_options(&self) -> &'static [Industry] {
        &Industry::ALL
    }
}
