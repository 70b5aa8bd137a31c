use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ScoutError;

/// Business category a prospective operator wants to open.
///
/// Determines which competitor tag rule is used for supply classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BusinessType {
    Cafe,
    Restaurant,
    #[serde(rename = "Bar/Pub")]
    BarPub,
    #[serde(rename = "Convenience Store")]
    ConvenienceStore,
    Pharmacy,
    #[serde(rename = "Gym/Fitness")]
    GymFitness,
    #[serde(rename = "Coworking Space")]
    CoworkingSpace,
}

impl BusinessType {
    pub const ALL: [BusinessType; 7] = [
        BusinessType::Cafe,
        BusinessType::Restaurant,
        BusinessType::BarPub,
        BusinessType::ConvenienceStore,
        BusinessType::Pharmacy,
        BusinessType::GymFitness,
        BusinessType::CoworkingSpace,
    ];

    /// Display label, matching the wire form used in API payloads
    pub fn label(&self) -> &'static str {
        match self {
            BusinessType::Cafe => "Cafe",
            BusinessType::Restaurant => "Restaurant",
            BusinessType::BarPub => "Bar/Pub",
            BusinessType::ConvenienceStore => "Convenience Store",
            BusinessType::Pharmacy => "Pharmacy",
            BusinessType::GymFitness => "Gym/Fitness",
            BusinessType::CoworkingSpace => "Coworking Space",
        }
    }
}

impl fmt::Display for BusinessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BusinessType {
    type Err = ScoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|bt| bt.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ScoutError::UnknownBusinessType { name: s.to_string() })
    }
}

/// Customer-source category a demand feature belongs to.
///
/// Mutually exclusive: every classified demand feature lands in exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DemandCategory {
    Office,
    Students,
    Residential,
    Transport,
}

impl DemandCategory {
    /// Fixed evaluation order for classification; first matching rule set wins
    pub const ORDERED: [DemandCategory; 4] = [
        DemandCategory::Office,
        DemandCategory::Students,
        DemandCategory::Residential,
        DemandCategory::Transport,
    ];
}

impl fmt::Display for DemandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DemandCategory::Office => "Office",
            DemandCategory::Students => "Students",
            DemandCategory::Residential => "Residential",
            DemandCategory::Transport => "Transport",
        };
        f.write_str(label)
    }
}

/// Three-way ordinal for the area's development trajectory,
/// derived from the active construction-site count
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GrowthStatus {
    Declining,
    Stable,
    Growing,
}

impl fmt::Display for GrowthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GrowthStatus::Declining => "Declining",
            GrowthStatus::Stable => "Stable",
            GrowthStatus::Growing => "Growing",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_type_round_trip() {
        for bt in BusinessType::ALL {
            assert_eq!(bt.label().parse::<BusinessType>().unwrap(), bt);
        }
    }

    #[test]
    fn test_business_type_parse_is_case_insensitive() {
        assert_eq!("cafe".parse::<BusinessType>().unwrap(), BusinessType::Cafe);
        assert_eq!("bar/pub".parse::<BusinessType>().unwrap(), BusinessType::BarPub);
    }

    #[test]
    fn test_unknown_business_type_is_rejected() {
        assert!(matches!(
            "Food Truck".parse::<BusinessType>(),
            Err(ScoutError::UnknownBusinessType { .. })
        ));
    }

    #[test]
    fn test_business_type_serde_uses_labels() {
        let json = serde_json::to_string(&BusinessType::BarPub).unwrap();
        assert_eq!(json, "\"Bar/Pub\"");
        let parsed: BusinessType = serde_json::from_str("\"Convenience Store\"").unwrap();
        assert_eq!(parsed, BusinessType::ConvenienceStore);
    }

    #[test]
    fn test_growth_status_is_ordered() {
        assert!(GrowthStatus::Declining < GrowthStatus::Stable);
        assert!(GrowthStatus::Stable < GrowthStatus::Growing);
    }
}
