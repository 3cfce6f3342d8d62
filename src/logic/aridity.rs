use crate::models::ClimateAggregates;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClimateCategory {
    Humid,
    Subhumid,
    Semiarid,
    Arid,
    Hyperarid,
}

impl ClimateCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClimateCategory::Humid => "Humid",
            ClimateCategory::Subhumid => "Subhumid",
            ClimateCategory::Semiarid => "Semiarid",
            ClimateCategory::Arid => "Arid",
            ClimateCategory::Hyperarid => "Hyperarid",
        }
    }

    pub fn from_index(ai: f64) -> Self {
        if ai >= 0.65 {
            ClimateCategory::Humid
        } else if ai >= 0.5 {
            ClimateCategory::Subhumid
        } else if ai >= 0.2 {
            ClimateCategory::Semiarid
        } else if ai >= 0.05 {
            ClimateCategory::Arid
        } else {
            ClimateCategory::Hyperarid
        }
    }
}

impl std::fmt::Display for ClimateCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DesertificationRisk {
    Low,
    Moderate,
    High,
    VeryHigh,
    AboveVeryHigh,
}

impl DesertificationRisk {
    pub fn as_str(&self) -> &'static str {
        match self {
            DesertificationRisk::Low => "Low (L)",
            DesertificationRisk::Moderate => "Moderate (M)",
            DesertificationRisk::High => "High (H)",
            DesertificationRisk::VeryHigh => "Very High (VH)",
            DesertificationRisk::AboveVeryHigh => "Above Very High (AVH)",
        }
    }

    pub fn from_index(ai: f64) -> Self {
        if ai < 0.05 {
            DesertificationRisk::AboveVeryHigh
        } else if ai <= 0.20 {
            DesertificationRisk::VeryHigh
        } else if ai <= 0.50 {
            DesertificationRisk::High
        } else if ai <= 0.65 {
            DesertificationRisk::Moderate
        } else {
            DesertificationRisk::Low
        }
    }
}

impl std::fmt::Display for DesertificationRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AridityAssessment {
    /// UNEP aridity index, mean precipitation over mean reference ET.
    pub index: f64,
    pub category: ClimateCategory,
    pub desertification_risk: DesertificationRisk,
}

/// Classify the climate behind a set of aggregates.
///
/// Returns `None` when there is no reference ET to divide by.
pub fn assess_aridity(climate: &ClimateAggregates) -> Option<AridityAssessment> {
    let pet = climate.mean_annual_reference_et();
    if pet <= 0.0 {
        return None;
    }

    let index = climate.mean_annual_precipitation() / pet;
    Some(AridityAssessment {
        index,
        category: ClimateCategory::from_index(index),
        desertification_risk: DesertificationRisk::from_index(index),
    })
}
