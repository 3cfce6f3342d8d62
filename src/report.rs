use crate::logic::aridity::AridityAssessment;
use crate::models::{IrrigationDiagnostic, IrrigationManagementPlan};
use serde::Serialize;

/// Message shown in place of a result when a model rejects its inputs.
pub const COMPUTE_FAILED: &str = "Could not compute; check your inputs.";

/// Outcome of one model inside a combined report.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Section<T> {
    Ok { result: T },
    Failed { message: String, reason: String },
}

impl<T> Section<T> {
    pub fn from_result(result: crate::error::Result<T>) -> Self {
        match result {
            Ok(result) => Section::Ok { result },
            Err(e) => {
                tracing::warn!("Model computation failed: {}", e);
                Section::Failed {
                    message: COMPUTE_FAILED.to_string(),
                    reason: e.to_string(),
                }
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AdvisoryReport {
    pub diagnostic: Section<IrrigationDiagnostic>,
    pub plan: Section<IrrigationManagementPlan>,
    pub aridity: Option<AridityAssessment>,
}

pub fn render_diagnostic(diag: &IrrigationDiagnostic) -> String {
    let lines = [
        "Cycle water balance".to_string(),
        format!("  Crop:                  {} (Kc {:.2})", diag.crop_label, diag.kc),
        format!("  Cycle:                 {} days", diag.cycle_duration_days),
        format!("  Crop water need (ETc): {:.2} mm", diag.crop_water_need_mm),
        format!("  Expected rainfall:     {:.2} mm", diag.expected_precipitation_mm),
        format!("  Irrigation need:       {:.2} mm", diag.total_irrigation_mm),
        format!("  Frequency:             every {} days", diag.frequency_days),
        format!("  Events:                {}", diag.number_of_events),
        format!("  Volume per event:      {:.2} mm", diag.volume_per_event_mm),
        format!(
            "  Share of ETc:          {:.2}% irrigation / {:.2}% rainfall",
            diag.pct_irrigation, diag.pct_precipitation
        ),
        String::new(),
        diag.message.clone(),
    ];
    join_lines(&lines)
}

pub fn render_plan(plan: &IrrigationManagementPlan) -> String {
    let params = &plan.parameters;
    let split = &plan.annual_split;
    let soil = plan
        .soil
        .map(|s| s.to_string())
        .unwrap_or_else(|| "Unknown (default)".to_string());
    let clamped = if plan.frequency_clamped {
        " (soil holds under a day of ETc)"
    } else {
        ""
    };
    let rain_source = if split.precipitation_defaulted {
        " (regional default)"
    } else {
        ""
    };

    let lines = [
        "Irrigation management plan".to_string(),
        format!("  Crop / soil / system:  {} / {} / {}", plan.crop, soil, plan.system),
        format!("  Frequency:             every {} days{}", plan.frequency_days, clamped),
        format!("  Net depth:             {:.1} mm per event", plan.net_depth_mm),
        format!("  Gross depth:           {:.1} mm per event", plan.gross_depth_mm),
        format!("  Daily ETc:             {:.2} mm/day", params.etc_daily_mm),
        format!(
            "  CAD {} mm/m, f {}, Z {} cm, Ei {}, group {}",
            params.cad_mm_per_m,
            params.availability_factor,
            params.root_depth_cm,
            params.efficiency,
            params.crop_group
        ),
        format!(
            "  Annual water:          {:.2} mm rain{} + {:.2} mm irrigation ({} events)",
            split.precipitation_mm, rain_source, split.irrigation_mm, split.events_per_year
        ),
        format!(
            "  Annual share:          {:.2}% irrigation / {:.2}% rainfall",
            split.pct_irrigation, split.pct_precipitation
        ),
    ];
    join_lines(&lines)
}

fn join_lines(lines: &[String]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub fn render_aridity(assessment: &AridityAssessment) -> String {
    format!(
        "Climate\n  Aridity index:         {:.2} ({})\n  Desertification risk:  {}\n",
        assessment.index, assessment.category, assessment.desertification_risk
    )
}

pub fn render_report(report: &AdvisoryReport) -> String {
    let mut out = String::new();
    for section in [
        render_section(&report.diagnostic, render_diagnostic),
        render_section(&report.plan, render_plan),
    ] {
        out.push_str(&section);
        out.push('\n');
    }
    match &report.aridity {
        Some(assessment) => out.push_str(&render_aridity(assessment)),
        None => out.push_str("Climate\n  Aridity index unavailable (no reference ET)\n"),
    }
    out
}

fn render_section<T>(section: &Section<T>, render: fn(&T) -> String) -> String {
    match section {
        Section::Ok { result } => render(result),
        Section::Failed { message, reason } => format!("{}\n  ({})\n", message, reason),
    }
}
