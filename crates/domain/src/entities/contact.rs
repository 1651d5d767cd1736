use super::fields;
use super::{iso_date, RecordId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const CONTACT_FIELDS: &[&str] = &[
    "Name",
    "email",
    "phone",
    "companyName",
    "firstName",
    "lastName",
    "jobTitle",
    "notes",
    "lastContactDate",
    "createdAt",
    "companyId",
];

/// A person the team is in touch with
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(rename = "Id")]
    pub id: RecordId,
    #[serde(rename = "Name", default, deserialize_with = "fields::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "fields::text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "fields::text")]
    pub phone: Option<String>,
    #[serde(rename = "companyName", default, deserialize_with = "fields::text")]
    pub company_name: Option<String>,
    #[serde(rename = "firstName", default, deserialize_with = "fields::text")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", default, deserialize_with = "fields::text")]
    pub last_name: Option<String>,
    #[serde(rename = "jobTitle", default, deserialize_with = "fields::text")]
    pub job_title: Option<String>,
    #[serde(default, deserialize_with = "fields::text")]
    pub notes: Option<String>,
    #[serde(
        rename = "lastContactDate",
        default,
        deserialize_with = "fields::timestamp"
    )]
    pub last_contact_date: Option<DateTime<Utc>>,
    #[serde(rename = "createdAt", default, deserialize_with = "fields::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "companyId", default, deserialize_with = "fields::reference")]
    pub company_id: Option<RecordId>,
}

impl Contact {
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => join_name(self.first_name.as_deref(), self.last_name.as_deref()),
        }
    }
}

fn join_name(first: Option<&str>, last: Option<&str>) -> String {
    format!("{} {}", first.unwrap_or(""), last.unwrap_or(""))
        .trim()
        .to_string()
}

/// Editable contact fields, used for both create and update
///
/// Updates replace every editable field, so unset fields are cleared.
#[derive(Debug, Clone, Default)]
pub struct ContactDraft {
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company_name: Option<String>,
    /// Fallback when `company_name` is not given
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub notes: Option<String>,
    pub company_id: Option<RecordId>,
}

impl ContactDraft {
    /// Explicit name, else "first last"
    pub fn resolved_name(&self) -> String {
        match self.name.as_deref().filter(|n| !n.is_empty()) {
            Some(name) => name.to_string(),
            None => join_name(self.first_name.as_deref(), self.last_name.as_deref()),
        }
    }

    fn editable_fields(&self, today: NaiveDate) -> Value {
        let mut record = json!({
            "Name": self.resolved_name(),
            "email": self.email.clone().unwrap_or_default(),
            "phone": self.phone.clone().unwrap_or_default(),
            "companyName": self
                .company_name
                .clone()
                .or_else(|| self.company.clone())
                .unwrap_or_default(),
            "firstName": self.first_name.clone().unwrap_or_default(),
            "lastName": self.last_name.clone().unwrap_or_default(),
            "jobTitle": self.job_title.clone().unwrap_or_default(),
            "notes": self.notes.clone().unwrap_or_default(),
            "lastContactDate": iso_date(&today),
        });
        if let (Some(id), Some(map)) = (self.company_id, record.as_object_mut()) {
            map.insert("companyId".to_string(), json!(id));
        }
        record
    }

    pub fn to_create_record(&self, today: NaiveDate) -> Value {
        let mut record = self.editable_fields(today);
        if let Some(map) = record.as_object_mut() {
            map.insert("createdAt".to_string(), json!(iso_date(&today)));
        }
        record
    }

    pub fn to_update_record(&self, id: RecordId, today: NaiveDate) -> Value {
        let mut record = self.editable_fields(today);
        if let Some(map) = record.as_object_mut() {
            map.insert("Id".to_string(), json!(id));
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 2).unwrap()
    }

    #[test]
    fn test_name_falls_back_to_first_and_last() {
        let draft = ContactDraft {
            first_name: Some("Alan".to_string()),
            last_name: Some("Turing".to_string()),
            ..ContactDraft::default()
        };
        assert_eq!(draft.resolved_name(), "Alan Turing");

        let draft = ContactDraft {
            last_name: Some("Turing".to_string()),
            ..ContactDraft::default()
        };
        assert_eq!(draft.resolved_name(), "Turing");
    }

    #[test]
    fn test_create_record_stamps_dates() {
        let record = ContactDraft {
            name: Some("Alan".to_string()),
            company: Some("Bletchley".to_string()),
            company_id: Some(RecordId::new(4)),
            ..ContactDraft::default()
        }
        .to_create_record(today());

        assert_eq!(record["Name"], "Alan");
        assert_eq!(record["companyName"], "Bletchley");
        assert_eq!(record["lastContactDate"], "2024-04-02");
        assert_eq!(record["createdAt"], "2024-04-02");
        assert_eq!(record["companyId"], 4);
        assert!(record.get("Id").is_none());
    }

    #[test]
    fn test_update_record_carries_id_but_not_created_at() {
        let record = ContactDraft::default().to_update_record(RecordId::new(8), today());
        assert_eq!(record["Id"], 8);
        assert_eq!(record["email"], "");
        assert!(record.get("createdAt").is_none());
        assert!(record.get("companyId").is_none());
    }

    #[test]
    fn test_decode_contact_with_lookup_company() {
        let contact: Contact = serde_json::from_value(json!({
            "Id": 3,
            "firstName": "Katherine",
            "lastName": "Johnson",
            "companyId": {"Id": 11, "Name": "NASA"},
            "createdAt": "2024-01-09"
        }))
        .unwrap();
        assert_eq!(contact.display_name(), "Katherine Johnson");
        assert_eq!(contact.company_id, Some(RecordId::new(11)));
    }
}
