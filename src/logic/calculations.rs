/// Round to a fixed number of decimal places for presentation.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// `numerator / denominator * 100`, or 0 when the denominator is not positive.
pub fn percentage_of(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator * 100.0
    } else {
        0.0
    }
}

/// Crop evapotranspiration from reference ET and a crop coefficient.
pub fn crop_evapotranspiration(reference_et: f64, kc: f64) -> f64 {
    reference_et * kc
}

/// Number of watering events needed to cover a period at a fixed interval.
pub fn events_in_period(period_days: f64, interval_days: u32) -> u32 {
    if interval_days == 0 || period_days <= 0.0 {
        return 0;
    }
    (period_days / interval_days as f64).ceil() as u32
}
