//! FetchQuery - filter, sort and paging parameters of a fetch
//!
//! Serializes to the store's query body:
//! `{"fields":[{"field":{"Name":..}}],"where":[..],"orderBy":[..],"pagingInfo":{..}}`

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    EqualTo,
}

/// Single `where` clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(rename = "FieldName")]
    pub field: String,
    #[serde(rename = "Operator")]
    pub operator: Operator,
    #[serde(rename = "Values")]
    pub values: Vec<Value>,
}

impl Condition {
    pub fn equal_to(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            operator: Operator::EqualTo,
            values: vec![value.into()],
        }
    }

    /// Whether a record satisfies this clause
    pub fn matches(&self, record: &Value) -> bool {
        let actual = record.get(&self.field).unwrap_or(&Value::Null);
        match self.operator {
            Operator::EqualTo => self.values.iter().any(|expected| loosely_equal(actual, expected)),
        }
    }
}

// Numbers compare by value so `7` matches `7.0` and `"7"`.
fn loosely_equal(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        (Value::String(a), Value::Number(b)) | (Value::Number(b), Value::String(a)) => {
            a.parse::<f64>().ok() == b.as_f64()
        }
        (Value::Object(map), other) => map.get("Id").map_or(false, |id| loosely_equal(id, other)),
        _ => actual == expected,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortSpec {
    #[serde(rename = "fieldName")]
    pub field: String,
    #[serde(rename = "sorttype")]
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    pub limit: usize,
    pub offset: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchQuery {
    #[serde(with = "field_list")]
    pub fields: Vec<String>,
    #[serde(rename = "where", default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
    #[serde(rename = "orderBy", default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<SortSpec>,
    #[serde(rename = "pagingInfo", default, skip_serializing_if = "Option::is_none")]
    pub paging: Option<Paging>,
}

impl FetchQuery {
    pub fn new(fields: &[&str]) -> Self {
        Self {
            fields: fields.iter().map(|f| f.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.order_by.push(SortSpec {
            field: field.into(),
            direction,
        });
        self
    }

    pub fn with_paging(mut self, limit: usize, offset: usize) -> Self {
        self.paging = Some(Paging { limit, offset });
        self
    }
}

/// `fields` travel as `[{"field":{"Name":"value"}}]`
mod field_list {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct FieldRef {
        field: FieldName,
    }

    #[derive(Serialize, Deserialize)]
    struct FieldName {
        #[serde(rename = "Name")]
        name: String,
    }

    pub fn serialize<S: Serializer>(fields: &[String], serializer: S) -> Result<S::Ok, S::Error> {
        fields
            .iter()
            .map(|name| FieldRef {
                field: FieldName { name: name.clone() },
            })
            .collect::<Vec<_>>()
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        let refs = Vec::<FieldRef>::deserialize(deserializer)?;
        Ok(refs.into_iter().map(|r| r.field.name).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_wire_shape() {
        let query = FetchQuery::new(&["Name", "date"])
            .with_condition(Condition::equal_to("entityType", "contact"))
            .order_by("date", SortDirection::Desc)
            .with_paging(10, 0);

        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "fields": [{"field": {"Name": "Name"}}, {"field": {"Name": "date"}}],
                "where": [{"FieldName": "entityType", "Operator": "EqualTo", "Values": ["contact"]}],
                "orderBy": [{"fieldName": "date", "sorttype": "DESC"}],
                "pagingInfo": {"limit": 10, "offset": 0}
            })
        );
    }

    #[test]
    fn test_plain_query_omits_empty_sections() {
        let value = serde_json::to_value(FetchQuery::new(&["Name"])).unwrap();
        assert!(value.get("where").is_none());
        assert!(value.get("orderBy").is_none());
        assert!(value.get("pagingInfo").is_none());
    }

    #[test]
    fn test_condition_matching() {
        let condition = Condition::equal_to("entityId", 7);
        assert!(condition.matches(&json!({"entityId": 7})));
        assert!(condition.matches(&json!({"entityId": "7"})));
        assert!(condition.matches(&json!({"entityId": {"Id": 7, "Name": "x"}})));
        assert!(!condition.matches(&json!({"entityId": 8})));
        assert!(!condition.matches(&json!({})));

        let condition = Condition::equal_to("entityType", "deal");
        assert!(condition.matches(&json!({"entityType": "deal"})));
        assert!(!condition.matches(&json!({"entityType": "Deal"})));
    }
}
