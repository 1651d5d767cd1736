//! Activity Application Service
//!
//! Timelines are always newest first.

use super::records::RecordTable;
use crate::ServiceResult;
use chrono::Utc;
use domain::entities::{Activity, ActivityUpdate, NewActivity, RecordId, ACTIVITY_FIELDS};
use domain::repositories::{Condition, FetchQuery, RecordStore, SortDirection};
use domain::value_objects::{EntityType, RecordKind};
use std::sync::Arc;
use tracing::{info, instrument};

pub const DEFAULT_RECENT_ACTIVITY_LIMIT: usize = 10;

/// Activities attached to one record, newest first
pub(crate) fn entity_query(
    activities: &RecordTable<Activity>,
    entity_type: EntityType,
    entity_id: RecordId,
) -> FetchQuery {
    activities
        .query()
        .with_condition(Condition::equal_to("entityType", entity_type.as_str()))
        .with_condition(Condition::equal_to("entityId", entity_id.value()))
        .order_by("date", SortDirection::Desc)
}

pub struct ActivityService {
    activities: RecordTable<Activity>,
}

impl ActivityService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            activities: RecordTable::new(store, RecordKind::Activity, ACTIVITY_FIELDS),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> ServiceResult<Vec<Activity>> {
        let query = self.activities.query().order_by("date", SortDirection::Desc);
        self.activities.fetch(&query).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: RecordId) -> ServiceResult<Activity> {
        self.activities.get(id).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_entity(&self, entity_type: EntityType, entity_id: RecordId) -> ServiceResult<Vec<Activity>> {
        let query = entity_query(&self.activities, entity_type, entity_id);
        self.activities.fetch(&query).await
    }

    #[instrument(skip(self, activity))]
    pub async fn create(&self, activity: &NewActivity) -> ServiceResult<Activity> {
        let created = self.activities.create(activity.to_record(Utc::now())).await?;
        info!("Logged {} activity {}", created.activity_type.as_str(), created.id);
        Ok(created)
    }

    #[instrument(skip(self, changes))]
    pub async fn update(&self, id: RecordId, changes: &ActivityUpdate) -> ServiceResult<Activity> {
        self.activities.update(changes.to_record(id)).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: RecordId) -> ServiceResult<()> {
        self.activities.delete(id).await
    }

    /// Set a task's completion flag and matching outcome text
    #[instrument(skip(self))]
    pub async fn mark_task_complete(&self, id: RecordId, completed: bool) -> ServiceResult<Activity> {
        self.update(id, &ActivityUpdate::completion(completed)).await
    }

    /// The `limit` newest activities
    #[instrument(skip(self))]
    pub async fn get_recent(&self, limit: usize) -> ServiceResult<Vec<Activity>> {
        let query = self
            .activities
            .query()
            .order_by("date", SortDirection::Desc)
            .with_paging(limit, 0);
        self.activities.fetch(&query).await
    }
}
