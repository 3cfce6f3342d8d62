use super::{CropKind, SoilKind, SystemKind};
use serde::{Deserialize, Serialize};

/// Output of the simple deficit model. Millimetre figures and percentages
/// are rounded to two decimals.
///
/// `pct_irrigation` and `pct_precipitation` are both taken against total crop
/// water need, so they only add up to 100 when rainfall does not exceed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrigationDiagnostic {
    pub crop: CropKind,
    pub crop_label: String,
    pub cycle_duration_days: f64,
    /// Net irrigation need over the whole cycle (clamped at zero).
    pub total_irrigation_mm: f64,
    /// Crop evapotranspiration over the cycle.
    pub crop_water_need_mm: f64,
    pub expected_precipitation_mm: f64,
    pub kc: f64,
    pub frequency_days: u32,
    pub number_of_events: u32,
    pub volume_per_event_mm: f64,
    pub pct_irrigation: f64,
    pub pct_precipitation: f64,
    pub message: String,
}

/// Coefficients and intermediate values behind a management plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagementParameters {
    /// Available water capacity, mm per metre of soil.
    pub cad_mm_per_m: f64,
    pub availability_factor: f64,
    pub root_depth_cm: f64,
    pub efficiency: f64,
    pub kc: f64,
    pub etc_daily_mm: f64,
    pub crop_group: u8,
    pub etc_index: usize,
    /// Net depth the soil buffer allows before flooring the frequency.
    pub theoretical_net_depth_mm: f64,
}

/// Share of a year's water supplied by rain versus the plan's irrigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualWaterSplit {
    pub precipitation_mm: f64,
    /// True when no precipitation was recorded and the regional default was used.
    pub precipitation_defaulted: bool,
    pub events_per_year: u32,
    pub irrigation_mm: f64,
    pub pct_irrigation: f64,
    pub pct_precipitation: f64,
}

/// Output of the operational management model. Depths are rounded to one
/// decimal, everything else to two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrigationManagementPlan {
    pub crop: CropKind,
    pub soil: Option<SoilKind>,
    pub system: SystemKind,
    pub frequency_days: u32,
    /// True when the root zone holds less than a day of ETc and the interval
    /// was raised from 0 to 1 day.
    pub frequency_clamped: bool,
    pub net_depth_mm: f64,
    pub gross_depth_mm: f64,
    pub parameters: ManagementParameters,
    pub annual_split: AnnualWaterSplit,
}
