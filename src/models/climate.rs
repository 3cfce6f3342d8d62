use crate::error::{AdvisorError, Result};
use serde::{Deserialize, Serialize};

pub const DAYS_PER_YEAR: f64 = 365.0;

/// Yearly climate totals (mm/year) produced by the external analysis pipeline.
///
/// Either series may be empty; an empty series averages to zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClimateAggregates {
    #[serde(default)]
    pub yearly_reference_et: Vec<f64>,
    #[serde(default)]
    pub yearly_precipitation: Vec<f64>,
}

impl ClimateAggregates {
    pub fn new(yearly_reference_et: Vec<f64>, yearly_precipitation: Vec<f64>) -> Self {
        Self {
            yearly_reference_et,
            yearly_precipitation,
        }
    }

    pub fn mean_annual_reference_et(&self) -> f64 {
        mean_or_zero(&self.yearly_reference_et, "reference ET")
    }

    pub fn mean_annual_precipitation(&self) -> f64 {
        mean_or_zero(&self.yearly_precipitation, "precipitation")
    }

    /// Mean daily ET₀ in mm/day.
    pub fn daily_reference_et(&self) -> f64 {
        self.mean_annual_reference_et() / DAYS_PER_YEAR
    }

    /// Mean daily precipitation in mm/day.
    pub fn daily_precipitation(&self) -> f64 {
        self.mean_annual_precipitation() / DAYS_PER_YEAR
    }

    /// Sum of every recorded year of precipitation.
    pub fn total_precipitation(&self) -> f64 {
        self.yearly_precipitation.iter().sum()
    }

    /// Extract the series the irrigation models need from the chart payload.
    ///
    /// ET₀ is the PET series (index 1) of the water-balance chart and
    /// precipitation is the first series of the precipitation chart.
    pub fn from_chart_payload(payload: &ChartPayload) -> Self {
        let yearly_reference_et = payload
            .water_balance
            .as_ref()
            .and_then(|chart| chart.series_values(1))
            .unwrap_or_default();
        let yearly_precipitation = payload
            .precipitation
            .as_ref()
            .and_then(|chart| chart.series_values(0))
            .unwrap_or_default();

        Self {
            yearly_reference_et,
            yearly_precipitation,
        }
    }
}

fn mean_or_zero(values: &[f64], label: &str) -> f64 {
    if values.is_empty() {
        tracing::debug!("No yearly {} values - treating mean as 0", label);
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Analysis results as served for chart rendering.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartPayload {
    #[serde(rename = "dados_grafico_balanco_hidrico", default)]
    pub water_balance: Option<Chart>,
    #[serde(rename = "dados_grafico_precipitacao", default)]
    pub precipitation: Option<Chart>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Chart {
    #[serde(rename = "dados", default)]
    pub data: Option<ChartData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartData {
    #[serde(default)]
    pub series: Vec<ChartSeries>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartSeries {
    #[serde(rename = "nome", default)]
    pub name: String,
    #[serde(rename = "valores", default)]
    pub values: Vec<f64>,
}

impl Chart {
    fn series_values(&self, index: usize) -> Option<Vec<f64>> {
        let series = self.data.as_ref()?.series.get(index)?;
        tracing::debug!("Using chart series '{}' ({} values)", series.name, series.values.len());
        Some(series.values.clone())
    }
}

const AGGREGATE_KEYS: &[&str] = &["yearly_reference_et", "yearly_precipitation"];
const CHART_KEYS: &[&str] = &["dados_grafico_balanco_hidrico", "dados_grafico_precipitacao"];

/// Climate input files come either as plain yearly series or as the chart payload.
#[derive(Debug, Clone)]
pub enum ClimateInput {
    Aggregates(ClimateAggregates),
    Charts(ChartPayload),
}

impl ClimateInput {
    /// Parse a climate file, choosing the shape by the keys it carries.
    ///
    /// Plain series are strict about unknown keys; chart payloads may carry
    /// other charts. A document with neither shape is rejected.
    pub fn from_json(content: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        let has_any = |keys: &[&str]| {
            value
                .as_object()
                .is_some_and(|obj| keys.iter().any(|k| obj.contains_key(*k)))
        };
        let is_aggregates = has_any(AGGREGATE_KEYS);
        let is_charts = has_any(CHART_KEYS);

        if is_aggregates {
            Ok(ClimateInput::Aggregates(serde_json::from_value(value)?))
        } else if is_charts {
            Ok(ClimateInput::Charts(serde_json::from_value(value)?))
        } else {
            Err(AdvisorError::invalid_input(format!(
                "climate file has neither yearly series ({}) nor chart data ({})",
                AGGREGATE_KEYS.join(", "),
                CHART_KEYS.join(", ")
            )))
        }
    }

    pub fn into_aggregates(self) -> ClimateAggregates {
        match self {
            ClimateInput::Aggregates(aggregates) => aggregates,
            ClimateInput::Charts(payload) => ClimateAggregates::from_chart_payload(&payload),
        }
    }
}
