use super::fields;
use super::{iso_timestamp, RecordId};
use crate::value_objects::{ActivityType, EntityType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

pub const ACTIVITY_FIELDS: &[&str] = &[
    "Name",
    "type",
    "title",
    "description",
    "outcome",
    "date",
    "entityType",
    "entityId",
    "createdAt",
    "dueDate",
    "completed",
];

/// Something that happened with (or is due for) a contact, company or deal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(rename = "Id")]
    pub id: RecordId,
    #[serde(rename = "Name", default, deserialize_with = "fields::text")]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub activity_type: ActivityType,
    #[serde(default, deserialize_with = "fields::text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "fields::text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "fields::text")]
    pub outcome: Option<String>,
    #[serde(default, deserialize_with = "fields::timestamp")]
    pub date: Option<DateTime<Utc>>,
    #[serde(rename = "entityType", default, deserialize_with = "fields::text")]
    pub entity_type: Option<String>,
    #[serde(rename = "entityId", default, deserialize_with = "fields::reference")]
    pub entity_id: Option<RecordId>,
    #[serde(rename = "createdAt", default, deserialize_with = "fields::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "dueDate", default, deserialize_with = "fields::timestamp")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "fields::flag")]
    pub completed: bool,
}

impl Activity {
    pub fn entity(&self) -> Option<EntityType> {
        self.entity_type.as_deref().and_then(|raw| raw.parse().ok())
    }
}

/// Input for logging an activity
#[derive(Debug, Clone, Default)]
pub struct NewActivity {
    pub activity_type: ActivityType,
    pub title: Option<String>,
    pub description: Option<String>,
    pub outcome: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub entity_type: Option<EntityType>,
    pub entity_id: Option<RecordId>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed: bool,
}

impl NewActivity {
    pub fn to_record(&self, now: DateTime<Utc>) -> Value {
        let mut record = json!({
            "Name": self.title.clone().unwrap_or_default(),
            "type": self.activity_type,
            "title": self.title.clone().unwrap_or_default(),
            "description": self.description.clone().unwrap_or_default(),
            "outcome": self.outcome.clone().unwrap_or_default(),
            "date": iso_timestamp(&self.date.unwrap_or(now)),
            "entityType": self.entity_type.map(|e| e.as_str()).unwrap_or_default(),
            "entityId": self.entity_id.map(|id| id.value()).unwrap_or(0),
            "createdAt": iso_timestamp(&now),
        });

        // Task-only fields
        if self.activity_type.is_task() {
            if let Some(map) = record.as_object_mut() {
                map.insert(
                    "dueDate".to_string(),
                    json!(self.due_date.as_ref().map(iso_timestamp).unwrap_or_default()),
                );
                map.insert("completed".to_string(), json!(self.completed));
            }
        }
        record
    }
}

/// Partial update of an activity
#[derive(Debug, Clone, Default)]
pub struct ActivityUpdate {
    pub name: Option<String>,
    pub title: Option<String>,
    pub activity_type: Option<ActivityType>,
    pub description: Option<String>,
    pub outcome: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed: Option<bool>,
}

impl ActivityUpdate {
    pub fn completion(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            outcome: Some(if completed { "Completed" } else { "In progress" }.to_string()),
            ..Self::default()
        }
    }

    pub fn to_record(&self, id: RecordId) -> Value {
        let mut map = Map::new();
        map.insert("Id".to_string(), json!(id));

        // Name mirrors the title unless given explicitly
        if let Some(name) = self.name.clone().or_else(|| self.title.clone()) {
            map.insert("Name".to_string(), json!(name));
        }
        if let Some(title) = &self.title {
            map.insert("title".to_string(), json!(title));
        }
        if let Some(kind) = &self.activity_type {
            map.insert("type".to_string(), json!(kind));
        }
        if let Some(description) = &self.description {
            map.insert("description".to_string(), json!(description));
        }
        if let Some(outcome) = &self.outcome {
            map.insert("outcome".to_string(), json!(outcome));
        }
        if let Some(date) = &self.date {
            map.insert("date".to_string(), json!(iso_timestamp(date)));
        }
        if let Some(due) = &self.due_date {
            map.insert("dueDate".to_string(), json!(iso_timestamp(due)));
        }
        if let Some(completed) = self.completed {
            map.insert("completed".to_string(), json!(completed));
        }
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_note_payload_has_no_task_fields() {
        let now = Utc.with_ymd_and_hms(2024, 2, 2, 12, 0, 0).unwrap();
        let record = NewActivity {
            title: Some("Intro call notes".to_string()),
            entity_type: Some(EntityType::Contact),
            entity_id: Some(RecordId::new(6)),
            ..NewActivity::default()
        }
        .to_record(now);

        assert_eq!(record["Name"], "Intro call notes");
        assert_eq!(record["type"], "note");
        assert_eq!(record["date"], "2024-02-02T12:00:00.000Z");
        assert_eq!(record["entityType"], "contact");
        assert_eq!(record["entityId"], 6);
        assert!(record.get("dueDate").is_none());
        assert!(record.get("completed").is_none());
    }

    #[test]
    fn test_task_payload_carries_due_date_and_completion() {
        let record = NewActivity {
            activity_type: ActivityType::Task,
            ..NewActivity::default()
        }
        .to_record(Utc::now());

        assert_eq!(record["type"], "task");
        assert_eq!(record["dueDate"], "");
        assert_eq!(record["completed"], false);
        assert_eq!(record["entityId"], 0);
    }

    #[test]
    fn test_completion_update() {
        let record = ActivityUpdate::completion(true).to_record(RecordId::new(1));
        assert_eq!(record["completed"], true);
        assert_eq!(record["outcome"], "Completed");

        let record = ActivityUpdate::completion(false).to_record(RecordId::new(1));
        assert_eq!(record["outcome"], "In progress");
        assert!(record.get("Name").is_none());
    }

    #[test]
    fn test_title_update_mirrors_name() {
        let record = ActivityUpdate {
            title: Some("Follow-up".to_string()),
            ..ActivityUpdate::default()
        }
        .to_record(RecordId::new(2));
        assert_eq!(record["Name"], "Follow-up");
        assert_eq!(record["title"], "Follow-up");
    }

    #[test]
    fn test_decode_activity() {
        let activity: Activity = serde_json::from_value(json!({
            "Id": 4,
            "type": "meeting",
            "entityType": "deal",
            "entityId": 12,
            "completed": null,
            "date": "2024-02-02T12:00:00Z"
        }))
        .unwrap();
        assert_eq!(activity.activity_type, ActivityType::Meeting);
        assert_eq!(activity.entity(), Some(EntityType::Deal));
        assert_eq!(activity.entity_id, Some(RecordId::new(12)));
        assert!(!activity.completed);
    }
}
