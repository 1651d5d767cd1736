//! Boundary decoding for loosely typed store fields
//!
//! The store returns JSON objects whose optional fields may be missing,
//! `null` or `""`. These helpers fold all three into "absent" and reject
//! values that do not fit the field instead of coercing them.

use crate::entities::RecordId;
use crate::errors::{DomainError, DomainResult};
use crate::value_objects::DealStage;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parse an RFC 3339 timestamp, a naive `YYYY-MM-DDTHH:MM:SS` (read as UTC)
/// or a bare `YYYY-MM-DD` date (midnight UTC).
pub fn parse_timestamp(field: &'static str, raw: &str) -> DomainResult<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    Err(DomainError::InvalidDate {
        field,
        value: raw.to_string(),
    })
}

/// Validate a monetary amount
pub fn check_amount(field: &'static str, value: f64) -> DomainResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(DomainError::NegativeAmount { field, value });
    }
    Ok(value)
}

fn present(value: Option<Value>) -> Option<Value> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        other => other,
    }
}

pub(crate) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match present(Option::<Value>::deserialize(deserializer)?) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        // Lookup fields come back as {"Id": .., "Name": ..}
        Some(Value::Object(map)) => Ok(map
            .get("Name")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)),
        Some(other) => Err(D::Error::custom(format!("expected text, got {other}"))),
    }
}

/// Missing, `null` and `""` stages are unset, not `lead`
pub(crate) fn stage<'de, D>(deserializer: D) -> Result<Option<DealStage>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text(deserializer)?.as_deref().map(DealStage::from))
}

pub(crate) fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match present(Option::<Value>::deserialize(deserializer)?) {
        None => return Ok(0.0),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| D::Error::custom(format!("amount out of range: {n}")))?,
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("amount is not numeric: '{s}'")))?,
        Some(other) => return Err(D::Error::custom(format!("expected amount, got {other}"))),
    };
    check_amount("value", value).map_err(D::Error::custom)
}

pub(crate) fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match present(Option::<Value>::deserialize(deserializer)?) {
        None => Ok(0),
        Some(Value::Number(n)) => n
            .as_u64()
            .ok_or_else(|| D::Error::custom(format!("count must be a non-negative integer: {n}"))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| D::Error::custom(format!("count is not numeric: '{s}'"))),
        Some(other) => Err(D::Error::custom(format!("expected count, got {other}"))),
    }
}

pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match present(Option::<Value>::deserialize(deserializer)?) {
        None => Ok(false),
        Some(Value::Bool(b)) => Ok(b),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(D::Error::custom(format!("expected boolean, got '{s}'"))),
        },
        Some(other) => Err(D::Error::custom(format!("expected boolean, got {other}"))),
    }
}

pub(crate) fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match present(Option::<Value>::deserialize(deserializer)?) {
        None => Ok(None),
        Some(Value::String(s)) => parse_timestamp("timestamp", &s)
            .map(Some)
            .map_err(D::Error::custom),
        Some(other) => Err(D::Error::custom(format!("expected timestamp, got {other}"))),
    }
}

pub(crate) fn reference<'de, D>(deserializer: D) -> Result<Option<RecordId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match present(Option::<Value>::deserialize(deserializer)?) {
        None => return Ok(None),
        Some(Value::Object(map)) => match map.get("Id") {
            Some(id) => id.clone(),
            None => return Ok(None),
        },
        Some(other) => other,
    };
    match raw {
        Value::Number(n) => n
            .as_i64()
            .map(|id| Some(RecordId::new(id)))
            .ok_or_else(|| D::Error::custom(format!("reference must be an integer: {n}"))),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => RecordId::parse("Reference", &s)
            .map(Some)
            .map_err(D::Error::custom),
        Value::Null => Ok(None),
        other => Err(D::Error::custom(format!("expected reference, got {other}"))),
    }
}
