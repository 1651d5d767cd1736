//! DealStage - pipeline phase of a deal

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Pipeline phase of a deal
///
/// The five canonical stages are ordered as the pipeline runs. Stages the
/// store returns outside that set are kept verbatim in `Other` so they still
/// count toward totals, but no stage-indexed view recognises them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DealStage {
    Lead,
    Qualified,
    Proposal,
    Negotiation,
    Closed,
    Other(String),
}

impl DealStage {
    /// Canonical stages in pipeline order
    pub const PIPELINE: [DealStage; 5] = [
        DealStage::Lead,
        DealStage::Qualified,
        DealStage::Proposal,
        DealStage::Negotiation,
        DealStage::Closed,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            DealStage::Lead => "lead",
            DealStage::Qualified => "qualified",
            DealStage::Proposal => "proposal",
            DealStage::Negotiation => "negotiation",
            DealStage::Closed => "closed",
            DealStage::Other(raw) => raw,
        }
    }

    /// Position in the pipeline, `None` for non-canonical stages
    pub fn pipeline_index(&self) -> Option<usize> {
        match self {
            DealStage::Lead => Some(0),
            DealStage::Qualified => Some(1),
            DealStage::Proposal => Some(2),
            DealStage::Negotiation => Some(3),
            DealStage::Closed => Some(4),
            DealStage::Other(_) => None,
        }
    }

    pub fn is_canonical(&self) -> bool {
        self.pipeline_index().is_some()
    }
}

impl From<&str> for DealStage {
    // Exact match only: "Closed" is not "closed".
    fn from(raw: &str) -> Self {
        match raw {
            "lead" => DealStage::Lead,
            "qualified" => DealStage::Qualified,
            "proposal" => DealStage::Proposal,
            "negotiation" => DealStage::Negotiation,
            "closed" => DealStage::Closed,
            other => DealStage::Other(other.to_string()),
        }
    }
}

impl FromStr for DealStage {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(DealStage::from(s))
    }
}

impl fmt::Display for DealStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DealStage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DealStage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(DealStage::from(raw.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_round_trip() {
        for (index, stage) in DealStage::PIPELINE.iter().enumerate() {
            assert_eq!(DealStage::from(stage.as_str()), *stage);
            assert_eq!(stage.pipeline_index(), Some(index));
        }
    }

    #[test]
    fn test_unknown_stage_is_preserved() {
        let stage = DealStage::from("on-hold");
        assert_eq!(stage, DealStage::Other("on-hold".to_string()));
        assert_eq!(stage.to_string(), "on-hold");
        assert!(!stage.is_canonical());

        // case-sensitive like the store
        assert!(!DealStage::from("Closed").is_canonical());
    }

    #[test]
    fn test_deserializes_from_store_text() {
        let stage: DealStage = serde_json::from_str("\"negotiation\"").unwrap();
        assert_eq!(stage, DealStage::Negotiation);
        assert!(serde_json::from_str::<DealStage>("null").is_err());
    }
}
