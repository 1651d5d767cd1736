//! Industry - closed list offered when classifying a company

use crate::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Industry {
    Technology,
    Manufacturing,
    Healthcare,
    Finance,
    Education,
    Retail,
    Energy,
    Transportation,
    #[serde(rename = "Real Estate")]
    RealEstate,
    Consulting,
    Media,
    Agriculture,
    Construction,
    Hospitality,
    Other,
}

impl Industry {
    /// Options in display order
    pub const ALL: [Industry; 15] = [
        Industry::Technology,
        Industry::Manufacturing,
        Industry::Healthcare,
        Industry::Finance,
        Industry::Education,
        Industry::Retail,
        Industry::Energy,
        Industry::Transportation,
        Industry::RealEstate,
        Industry::Consulting,
        Industry::Media,
        Industry::Agriculture,
        Industry::Construction,
        Industry::Hospitality,
        Industry::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Industry::Technology => "Technology",
            Industry::Manufacturing => "Manufacturing",
            Industry::Healthcare => "Healthcare",
            Industry::Finance => "Finance",
            Industry::Education => "Education",
            Industry::Retail => "Retail",
            Industry::Energy => "Energy",
            Industry::Transportation => "Transportation",
            Industry::RealEstate => "Real Estate",
            Industry::Consulting => "Consulting",
            Industry::Media => "Media",
            Industry::Agriculture => "Agriculture",
            Industry::Construction => "Construction",
            Industry::Hospitality => "Hospitality",
            Industry::Other => "Other",
        }
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Industry {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Industry::ALL
            .iter()
            .find(|industry| industry.label().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| DomainError::UnknownIndustry(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip() {
        for industry in Industry::ALL {
            assert_eq!(industry.label().parse::<Industry>().unwrap(), industry);
        }
        assert_eq!("real estate".parse::<Industry>().unwrap(), Industry::RealEstate);
        assert!("Mining".parse::<Industry>().is_err());
    }

    #[test]
    fn test_serialized_label_matches_store() {
        assert_eq!(
            serde_json::to_string(&Industry::RealEstate).unwrap(),
            "\"Real Estate\""
        );
    }
}
