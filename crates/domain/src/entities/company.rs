use super::fields;
use super::RecordId;
use crate::value_objects::Industry;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const COMPANY_FIELDS: &[&str] = &[
    "Name",
    "industry",
    "employeeCount",
    "website",
    "address",
    "description",
    "contactCount",
];

/// An organisation deals and contacts belong to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Company {
    #[serde(rename = "Id")]
    pub id: RecordId,
    #[serde(rename = "Name", default, deserialize_with = "fields::text")]
    pub name: Option<String>,
    /// Free text in the store; normally one of `Industry::ALL`
    #[serde(default, deserialize_with = "fields::text")]
    pub industry: Option<String>,
    #[serde(rename = "employeeCount", default, deserialize_with = "fields::count")]
    pub employee_count: u64,
    #[serde(default, deserialize_with = "fields::text")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "fields::text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "fields::text")]
    pub description: Option<String>,
    #[serde(rename = "contactCount", default, deserialize_with = "fields::count")]
    pub contact_count: u64,
}

/// Editable company fields; updates replace all of them
#[derive(Debug, Clone, Default)]
pub struct CompanyDraft {
    pub name: Option<String>,
    pub industry: Option<Industry>,
    pub employee_count: u64,
    pub website: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
}

impl CompanyDraft {
    fn editable_fields(&self) -> Value {
        json!({
            "Name": self.name.clone().unwrap_or_default(),
            "industry": self.industry.map(|i| i.label()).unwrap_or_default(),
            "employeeCount": self.employee_count,
            "website": self.website.clone().unwrap_or_default(),
            "address": self.address.clone().unwrap_or_default(),
            "description": self.description.clone().unwrap_or_default(),
        })
    }

    /// New companies start without contacts
    pub fn to_create_record(&self) -> Value {
        let mut record = self.editable_fields();
        if let Some(map) = record.as_object_mut() {
            map.insert("contactCount".to_string(), json!(0));
        }
        record
    }

    pub fn to_update_record(&self, id: RecordId) -> Value {
        let mut record = self.editable_fields();
        if let Some(map) = record.as_object_mut() {
            map.insert("Id".to_string(), json!(id));
        }
        record
    }
}
