//! Activity classification and the record kinds activities attach to

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Kind of logged activity; unknown kinds are preserved verbatim
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ActivityType {
    #[default]
    Note,
    Call,
    Email,
    Meeting,
    Task,
    Other(String),
}

impl ActivityType {
    pub fn as_str(&self) -> &str {
        match self {
            ActivityType::Note => "note",
            ActivityType::Call => "call",
            ActivityType::Email => "email",
            ActivityType::Meeting => "meeting",
            ActivityType::Task => "task",
            ActivityType::Other(raw) => raw,
        }
    }

    pub fn is_task(&self) -> bool {
        matches!(self, ActivityType::Task)
    }
}

impl From<&str> for ActivityType {
    fn from(raw: &str) -> Self {
        match raw {
            "note" => ActivityType::Note,
            "call" => ActivityType::Call,
            "email" => ActivityType::Email,
            "meeting" => ActivityType::Meeting,
            "task" => ActivityType::Task,
            other => ActivityType::Other(other.to_string()),
        }
    }
}

impl FromStr for ActivityType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ActivityType::from(s))
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ActivityType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ActivityType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(ActivityType::from)
            .unwrap_or_default())
    }
}

/// Record kind an activity is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Contact,
    Company,
    Deal,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Contact => "contact",
            EntityType::Company => "company",
            EntityType::Deal => "deal",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "contact" => Ok(EntityType::Contact),
            "company" => Ok(EntityType::Company),
            "deal" => Ok(EntityType::Deal),
            other => Err(format!("unknown entity type: {other}")),
        }
    }
}
