use super::calculations::{crop_evapotranspiration, percentage_of, round_to};
use super::coefficients::{
    availability_factor, available_water_capacity_or_default, crop_coefficient_or_default,
    crop_group_or_default, etc_index, root_depth_or_default, system_efficiency_or_default,
};
use crate::error::{AdvisorError, Result};
use crate::models::{
    AnnualWaterSplit, ClimateAggregates, FormAnswers, IrrigationManagementPlan,
    ManagementParameters, DAYS_PER_YEAR,
};

/// Regional annual precipitation assumed when no rainfall was recorded (mm).
pub const FALLBACK_ANNUAL_PRECIPITATION_MM: f64 = 1200.0;

/// Operational management model: per-event net and gross depths and a
/// watering interval derived from how much water the root zone can buffer.
///
/// Fails when no irrigation system is selected or when daily crop
/// evapotranspiration is zero (the interval would be unbounded).
pub fn compute_management_plan(
    form: &FormAnswers,
    climate: &ClimateAggregates,
) -> Result<IrrigationManagementPlan> {
    let system = form.irrigation_system.ok_or_else(|| {
        AdvisorError::invalid_input("an irrigation system must be selected for a management plan")
    })?;

    let kc = crop_coefficient_or_default(form.crop);
    let etc_daily = crop_evapotranspiration(climate.daily_reference_et(), kc);
    if !etc_daily.is_finite() || etc_daily <= 0.0 {
        return Err(AdvisorError::invalid_input(format!(
            "daily crop evapotranspiration must be positive to schedule irrigation (got {})",
            etc_daily
        )));
    }

    let cad_per_m = available_water_capacity_or_default(form.soil_texture);
    let root_depth_cm = root_depth_or_default(form.crop);
    let efficiency = system_efficiency_or_default(system);
    let group = crop_group_or_default(form.crop);
    let index = etc_index(etc_daily);
    let f = availability_factor(group, index);

    let cad_per_cm = cad_per_m / 100.0;
    let net_depth = cad_per_cm * f * root_depth_cm;

    // Floored: never wait longer than the soil buffer lasts
    let mut frequency_days = (net_depth / etc_daily).floor() as u32;
    let frequency_clamped = frequency_days == 0;
    if frequency_clamped {
        tracing::warn!(
            "Root zone holds {:.2} mm, less than one day of ETc ({:.2} mm) - irrigating daily",
            net_depth,
            etc_daily
        );
        frequency_days = 1;
    }

    let adjusted_net_depth = frequency_days as f64 * etc_daily;
    let gross_depth = adjusted_net_depth / efficiency;

    tracing::debug!(
        "Management plan for {}: cad={} f={} z={} ei={} etc={:.3} net={:.3} freq={}",
        form.crop,
        cad_per_m,
        f,
        root_depth_cm,
        efficiency,
        etc_daily,
        net_depth,
        frequency_days
    );

    let annual_split = annual_water_split(climate, frequency_days, gross_depth);

    Ok(IrrigationManagementPlan {
        crop: form.crop,
        soil: form.soil_texture,
        system,
        frequency_days,
        frequency_clamped,
        net_depth_mm: round_to(adjusted_net_depth, 1),
        gross_depth_mm: round_to(gross_depth, 1),
        parameters: ManagementParameters {
            cad_mm_per_m: cad_per_m,
            availability_factor: f,
            root_depth_cm,
            efficiency,
            kc,
            etc_daily_mm: round_to(etc_daily, 2),
            crop_group: group,
            etc_index: index,
            theoretical_net_depth_mm: round_to(net_depth, 2),
        },
        annual_split,
    })
}

/// Rain vs. irrigation share over a year, using the summed precipitation record.
fn annual_water_split(
    climate: &ClimateAggregates,
    frequency_days: u32,
    gross_depth: f64,
) -> AnnualWaterSplit {
    let recorded = climate.total_precipitation();
    let precipitation_defaulted = recorded == 0.0;
    let precipitation = if precipitation_defaulted {
        tracing::warn!(
            "No precipitation recorded - assuming {} mm/year",
            FALLBACK_ANNUAL_PRECIPITATION_MM
        );
        FALLBACK_ANNUAL_PRECIPITATION_MM
    } else {
        recorded
    };

    let events_per_year = (DAYS_PER_YEAR / frequency_days as f64).floor() as u32;
    let irrigation = events_per_year as f64 * gross_depth;
    let pct_precipitation = percentage_of(precipitation, precipitation + irrigation);

    AnnualWaterSplit {
        precipitation_mm: round_to(precipitation, 2),
        precipitation_defaulted,
        events_per_year,
        irrigation_mm: round_to(irrigation, 2),
        pct_irrigation: round_to(100.0 - pct_precipitation, 2),
        pct_precipitation: round_to(pct_precipitation, 2),
    }
}
