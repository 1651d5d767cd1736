use super::fields;
use super::{iso_timestamp, RecordId};
use crate::errors::DomainResult;
use crate::value_objects::DealStage;
use crate::Amount;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Field list requested for deals
pub const DEAL_FIELDS: &[&str] = &[
    "Name",
    "value",
    "contact",
    "stage",
    "createdAt",
    "stageUpdatedAt",
    "description",
    "contactId",
    "companyId",
    "contactName",
    "companyName",
    "closeDate",
];

/// A sales opportunity moving through the pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    #[serde(rename = "Id")]
    pub id: RecordId,
    #[serde(rename = "Name", default, deserialize_with = "fields::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "fields::amount")]
    pub value: Amount,
    /// Display name of the person; preferred over `contact_name`
    #[serde(default, deserialize_with = "fields::text")]
    pub contact: Option<String>,
    /// `None` when the store row has no stage; such deals sit outside every stage view
    #[serde(default, deserialize_with = "fields::stage")]
    pub stage: Option<DealStage>,
    #[serde(rename = "createdAt", default, deserialize_with = "fields::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        rename = "stageUpdatedAt",
        default,
        deserialize_with = "fields::timestamp"
    )]
    pub stage_updated_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "fields::text")]
    pub description: Option<String>,
    #[serde(rename = "contactId", default, deserialize_with = "fields::reference")]
    pub contact_id: Option<RecordId>,
    #[serde(rename = "companyId", default, deserialize_with = "fields::reference")]
    pub company_id: Option<RecordId>,
    #[serde(rename = "contactName", default, deserialize_with = "fields::text")]
    pub contact_name: Option<String>,
    #[serde(rename = "companyName", default, deserialize_with = "fields::text")]
    pub company_name: Option<String>,
    #[serde(rename = "closeDate", default, deserialize_with = "fields::timestamp")]
    pub close_date: Option<DateTime<Utc>>,
}

impl Deal {
    /// Identity used when grouping deals by person
    pub fn contact_label(&self) -> Option<&str> {
        self.contact.as_deref().or(self.contact_name.as_deref())
    }

    /// Date used by recency filters
    pub fn effective_date(&self) -> Option<DateTime<Utc>> {
        self.created_at.or(self.stage_updated_at)
    }
}

/// Input for creating a deal
#[derive(Debug, Clone, Default)]
pub struct NewDeal {
    pub name: Option<String>,
    pub value: Amount,
    pub contact: Option<String>,
    pub contact_name: Option<String>,
    pub stage: Option<DealStage>,
    pub description: Option<String>,
    pub company_name: Option<String>,
    pub close_date: Option<DateTime<Utc>>,
    pub contact_id: Option<RecordId>,
    pub company_id: Option<RecordId>,
}

impl NewDeal {
    /// Build the create payload; both timestamps are stamped with `now`
    pub fn to_record(&self, now: DateTime<Utc>) -> DomainResult<Value> {
        let value = fields::check_amount("value", self.value)?;
        let stamp = iso_timestamp(&now);

        let mut record = json!({
            "Name": self.name.clone().unwrap_or_default(),
            "value": value,
            "contact": self
                .contact_name
                .clone()
                .or_else(|| self.contact.clone())
                .unwrap_or_default(),
            "stage": self.stage.clone().unwrap_or(DealStage::Lead),
            "description": self.description.clone().unwrap_or_default(),
            "createdAt": stamp,
            "stageUpdatedAt": stamp,
            "contactName": self.contact_name.clone().unwrap_or_default(),
            "companyName": self.company_name.clone().unwrap_or_default(),
            "closeDate": self.close_date.as_ref().map(iso_timestamp).unwrap_or_default(),
        });

        if let Some(map) = record.as_object_mut() {
            if let Some(id) = self.contact_id {
                map.insert("contactId".to_string(), Value::String(id.to_string()));
            }
            if let Some(id) = self.company_id {
                map.insert("companyId".to_string(), Value::String(id.to_string()));
            }
        }
        Ok(record)
    }
}

/// Partial update of a deal; only `Some` fields are written
#[derive(Debug, Clone, Default)]
pub struct DealUpdate {
    pub name: Option<String>,
    pub value: Option<Amount>,
    pub contact: Option<String>,
    pub contact_name: Option<String>,
    pub stage: Option<DealStage>,
    pub stage_updated_at: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub company_name: Option<String>,
    pub close_date: Option<DateTime<Utc>>,
    pub contact_id: Option<RecordId>,
    pub company_id: Option<RecordId>,
}

impl DealUpdate {
    /// Stage move stamped with the time of the change
    pub fn stage(stage: DealStage, now: DateTime<Utc>) -> Self {
        Self {
            stage: Some(stage),
            stage_updated_at: Some(now),
            ..Self::default()
        }
    }

    pub fn to_record(&self, id: RecordId) -> DomainResult<Value> {
        let mut map = Map::new();
        map.insert("Id".to_string(), json!(id));

        let mut put = |key: &str, value: Option<Value>| {
            if let Some(value) = value {
                map.insert(key.to_string(), value);
            }
        };

        put("Name", self.name.clone().map(Value::String));
        if let Some(value) = self.value {
            put("value", Some(json!(fields::check_amount("value", value)?)));
        }
        put("contact", self.contact.clone().map(Value::String));
        put("contactName", self.contact_name.clone().map(Value::String));
        put("stage", self.stage.as_ref().map(|s| json!(s)));
        put(
            "stageUpdatedAt",
            self.stage_updated_at.as_ref().map(|ts| json!(iso_timestamp(ts))),
        );
        put("description", self.description.clone().map(Value::String));
        put("companyName", self.company_name.clone().map(Value::String));
        put(
            "closeDate",
            self.close_date.as_ref().map(|ts| json!(iso_timestamp(ts))),
        );
        put("contactId", self.contact_id.map(|id| json!(id.to_string())));
        put("companyId", self.company_id.map(|id| json!(id.to_string())));

        Ok(Value::Object(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_decode_store_row() {
        let row = json!({
            "Id": 12,
            "Name": "Renewal",
            "value": 2500,
            "contact": "",
            "contactName": "Ada Lovelace",
            "stage": "proposal",
            "createdAt": "2024-05-01T10:00:00.000Z",
            "stageUpdatedAt": null,
            "companyName": "Analytical Engines",
            "companyId": "7",
            "closeDate": "2024-06-30"
        });

        let deal: Deal = serde_json::from_value(row).unwrap();
        assert_eq!(deal.id, RecordId::new(12));
        assert_eq!(deal.value, 2500.0);
        assert_eq!(deal.contact, None);
        assert_eq!(deal.contact_label(), Some("Ada Lovelace"));
        assert_eq!(deal.stage, Some(DealStage::Proposal));
        assert_eq!(deal.company_id, Some(RecordId::new(7)));
        assert_eq!(
            deal.close_date,
            Some(Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_missing_value_decodes_as_zero() {
        let deal: Deal = serde_json::from_value(json!({"Id": 1, "stage": "lead"})).unwrap();
        assert_eq!(deal.value, 0.0);

        let deal: Deal = serde_json::from_value(json!({"Id": 1, "value": null})).unwrap();
        assert_eq!(deal.value, 0.0);
    }

    #[test]
    fn test_malformed_fields_are_rejected() {
        assert!(serde_json::from_value::<Deal>(json!({"Id": 1, "value": "lots"})).is_err());
        assert!(serde_json::from_value::<Deal>(json!({"Id": 1, "value": -10})).is_err());
        assert!(
            serde_json::from_value::<Deal>(json!({"Id": 1, "createdAt": "yesterday"})).is_err()
        );
    }

    #[test]
    fn test_missing_stage_stays_unset() {
        for row in [
            json!({"Id": 1, "value": 10}),
            json!({"Id": 2, "stage": null}),
            json!({"Id": 3, "stage": ""}),
        ] {
            let deal: Deal = serde_json::from_value(row).unwrap();
            assert_eq!(deal.stage, None);
        }
    }

    #[test]
    fn test_effective_date_prefers_created_at() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let moved = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let mut deal = Deal {
            created_at: Some(created),
            stage_updated_at: Some(moved),
            ..Deal::default()
        };
        assert_eq!(deal.effective_date(), Some(created));
        deal.created_at = None;
        assert_eq!(deal.effective_date(), Some(moved));
    }

    #[test]
    fn test_create_payload_defaults() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let payload = NewDeal {
            contact: Some("Grace".to_string()),
            company_id: Some(RecordId::new(3)),
            ..NewDeal::default()
        }
        .to_record(now)
        .unwrap();

        assert_eq!(payload["Name"], "");
        assert_eq!(payload["value"], 0.0);
        assert_eq!(payload["contact"], "Grace");
        assert_eq!(payload["stage"], "lead");
        assert_eq!(payload["createdAt"], "2024-03-01T09:30:00.000Z");
        assert_eq!(payload["stageUpdatedAt"], payload["createdAt"]);
        assert_eq!(payload["companyId"], "3");
        assert!(payload.get("contactId").is_none());
    }

    #[test]
    fn test_contact_name_wins_in_create_payload() {
        let payload = NewDeal {
            contact: Some("Grace".to_string()),
            contact_name: Some("Grace Hopper".to_string()),
            ..NewDeal::default()
        }
        .to_record(Utc::now())
        .unwrap();
        assert_eq!(payload["contact"], "Grace Hopper");
        assert_eq!(payload["contactName"], "Grace Hopper");
    }

    #[test]
    fn test_negative_value_is_rejected_before_writing() {
        let new_deal = NewDeal {
            value: -1.0,
            ..NewDeal::default()
        };
        assert!(new_deal.to_record(Utc::now()).is_err());

        let update = DealUpdate {
            value: Some(-3.0),
            ..DealUpdate::default()
        };
        assert!(update.to_record(RecordId::new(1)).is_err());
    }

    #[test]
    fn test_update_payload_only_carries_provided_fields() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let payload = DealUpdate::stage(DealStage::Closed, now)
            .to_record(RecordId::new(9))
            .unwrap();
        let map = payload.as_object().unwrap();

        assert_eq!(map.len(), 3);
        assert_eq!(map["Id"], 9);
        assert_eq!(map["stage"], "closed");
        assert_eq!(map["stageUpdatedAt"], "2024-03-01T00:00:00.000Z");
    }
}
