use super::calculations::{crop_evapotranspiration, events_in_period, percentage_of, round_to};
use super::coefficients::{crop_coefficient_or_default, irrigation_frequency_or_default};
use crate::error::{AdvisorError, Result};
use crate::models::{ClimateAggregates, FormAnswers, IrrigationDiagnostic};

/// Simple deficit model: one water balance over the whole crop cycle, split
/// evenly across a soil-dependent watering interval.
///
/// Missing climate series count as zero. Fails only when the cycle duration
/// is not a positive number of days.
pub fn compute_simple_deficit(
    form: &FormAnswers,
    climate: &ClimateAggregates,
) -> Result<IrrigationDiagnostic> {
    let cycle_days = form.cycle_duration_days;
    if !cycle_days.is_finite() || cycle_days <= 0.0 {
        return Err(AdvisorError::invalid_input(format!(
            "cycle duration must be a positive number of days (got {})",
            cycle_days
        )));
    }

    let kc = crop_coefficient_or_default(form.crop);
    let etc_daily = crop_evapotranspiration(climate.daily_reference_et(), kc);
    let etc_total = etc_daily * cycle_days;
    let precipitation_total = climate.daily_precipitation() * cycle_days;

    // Rainfall surplus never turns into a negative need
    let deficit = (etc_total - precipitation_total).max(0.0);

    let frequency_days = irrigation_frequency_or_default(form.soil_texture);
    let number_of_events = events_in_period(cycle_days, frequency_days);
    let volume_per_event = if number_of_events > 0 && deficit > 0.0 {
        deficit / number_of_events as f64
    } else {
        0.0
    };

    // Both shares are relative to ETc, not to each other
    let pct_irrigation = percentage_of(deficit, etc_total);
    let pct_precipitation = percentage_of(precipitation_total, etc_total);

    tracing::debug!(
        "Simple deficit for {}: kc={} etc_total={:.2} prec_total={:.2} deficit={:.2}",
        form.crop,
        kc,
        etc_total,
        precipitation_total,
        deficit
    );

    let message = format!(
        "For {} with a {}-day cycle, total crop water need (ETc) is approximately {:.2} mm. \
         With {:.2} mm of expected precipitation over the same period, supplemental \
         irrigation (net depth) of {:.2} mm is needed.",
        form.crop_label, cycle_days, etc_total, precipitation_total, deficit
    );

    Ok(IrrigationDiagnostic {
        crop: form.crop,
        crop_label: form.crop_label.clone(),
        cycle_duration_days: cycle_days,
        total_irrigation_mm: round_to(deficit, 2),
        crop_water_need_mm: round_to(etc_total, 2),
        expected_precipitation_mm: round_to(precipitation_total, 2),
        kc,
        frequency_days,
        number_of_events,
        volume_per_event_mm: round_to(volume_per_event, 2),
        pct_irrigation: round_to(pct_irrigation, 2),
        pct_precipitation: round_to(pct_precipitation, 2),
        message,
    })
}
