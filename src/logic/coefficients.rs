//! Agronomic coefficient tables.
//!
//! Every lookup returns `None` for keys the table does not cover; the
//! `*_or_default` helpers apply the documented default for that table.
//! Values follow the FAO-56 / Doorenbos & Kassam crop water methodology as
//! adopted by Embrapa Circular Técnica 136.

use crate::models::{CropKind, SoilKind, SystemKind};

pub const DEFAULT_CROP_COEFFICIENT: f64 = 1.0;
pub const DEFAULT_SOIL_FREQUENCY_DAYS: u32 = 3;
/// Loam water-holding capacity.
pub const DEFAULT_AVAILABLE_WATER_CAPACITY: f64 = 170.0;
pub const DEFAULT_ROOT_DEPTH_CM: f64 = 40.0;
pub const DEFAULT_SYSTEM_EFFICIENCY: f64 = 0.75;
pub const DEFAULT_CROP_GROUP: u8 = 3;

/// Lowest daily ETc (mm/day) covered by the availability-factor table.
pub const AVAILABILITY_MIN_ETC: i64 = 2;
pub const AVAILABILITY_MAX_INDEX: usize = 8;

/// Fraction of available water that may deplete before stress ("f"),
/// by crop group (rows 1..=4) and daily ETc of 2..=10 mm/day (columns).
const AVAILABILITY_FACTOR: [[f64; AVAILABILITY_MAX_INDEX + 1]; 4] = [
    [0.50, 0.425, 0.35, 0.30, 0.25, 0.225, 0.20, 0.20, 0.175],
    [0.675, 0.575, 0.475, 0.40, 0.35, 0.325, 0.275, 0.25, 0.225],
    [0.80, 0.70, 0.60, 0.50, 0.45, 0.425, 0.375, 0.35, 0.30],
    [0.875, 0.80, 0.70, 0.60, 0.55, 0.50, 0.45, 0.425, 0.40],
];

/// Mid-season crop coefficient (Kc).
pub fn crop_coefficient(crop: CropKind) -> Option<f64> {
    match crop {
        CropKind::Bean => Some(1.10),
        CropKind::Corn => Some(1.20),
        CropKind::Soybean => Some(1.15),
        CropKind::Cotton => Some(1.18),
        CropKind::Sunflower => Some(1.08),
        CropKind::Tomato => Some(1.15),
        CropKind::Potato => Some(1.15),
        CropKind::Other => None,
    }
}

pub fn crop_coefficient_or_default(crop: CropKind) -> f64 {
    crop_coefficient(crop).unwrap_or(DEFAULT_CROP_COEFFICIENT)
}

/// Fixed watering interval of the simple model, in days.
pub fn irrigation_frequency_by_soil(soil: SoilKind) -> Option<u32> {
    match soil {
        SoilKind::Sandy => Some(2),
        SoilKind::Loam => Some(3),
        SoilKind::Clay => Some(5),
        SoilKind::SandyLoam | SoilKind::ClayLoam | SoilKind::SiltyClay => None,
    }
}

pub fn irrigation_frequency_or_default(soil: Option<SoilKind>) -> u32 {
    soil.and_then(irrigation_frequency_by_soil)
        .unwrap_or(DEFAULT_SOIL_FREQUENCY_DAYS)
}

/// Available water capacity (CAD) in mm per metre of soil.
pub fn available_water_capacity(soil: SoilKind) -> Option<f64> {
    match soil {
        SoilKind::Sandy => Some(85.0),
        SoilKind::SandyLoam => Some(120.0),
        SoilKind::Loam => Some(170.0),
        SoilKind::ClayLoam => Some(190.0),
        SoilKind::SiltyClay => Some(200.0),
        SoilKind::Clay => Some(210.0),
    }
}

pub fn available_water_capacity_or_default(soil: Option<SoilKind>) -> f64 {
    soil.and_then(available_water_capacity)
        .unwrap_or(DEFAULT_AVAILABLE_WATER_CAPACITY)
}

/// Effective root depth (Z) in cm.
pub fn root_depth(crop: CropKind) -> Option<f64> {
    match crop {
        CropKind::Bean => Some(25.0),
        CropKind::Corn => Some(40.0),
        CropKind::Soybean => Some(40.0),
        CropKind::Cotton => Some(50.0),
        CropKind::Sunflower => Some(50.0),
        CropKind::Tomato => Some(30.0),
        CropKind::Potato => Some(25.0),
        CropKind::Other => None,
    }
}

pub fn root_depth_or_default(crop: CropKind) -> f64 {
    root_depth(crop).unwrap_or(DEFAULT_ROOT_DEPTH_CM)
}

/// Application efficiency (Ei) as a fraction.
pub fn system_efficiency(system: SystemKind) -> Option<f64> {
    match system {
        SystemKind::FixedSprinkler => Some(0.75),
        SystemKind::CenterPivot => Some(0.85),
        SystemKind::Drip => Some(0.90),
    }
}

pub fn system_efficiency_or_default(system: SystemKind) -> f64 {
    system_efficiency(system).unwrap_or(DEFAULT_SYSTEM_EFFICIENCY)
}

/// Water-sensitivity group, 1 (most sensitive) to 4 (most tolerant).
pub fn crop_group(crop: CropKind) -> Option<u8> {
    match crop {
        CropKind::Potato => Some(1),
        CropKind::Tomato => Some(2),
        CropKind::Bean | CropKind::Sunflower => Some(3),
        CropKind::Corn | CropKind::Soybean | CropKind::Cotton => Some(4),
        CropKind::Other => None,
    }
}

pub fn crop_group_or_default(crop: CropKind) -> u8 {
    crop_group(crop).unwrap_or(DEFAULT_CROP_GROUP)
}

/// Column of the availability table for a daily ETc.
///
/// Rounds to whole mm/day and saturates at the table edges.
pub fn etc_index(etc_daily: f64) -> usize {
    let rounded = etc_daily.round() as i64;
    (rounded - AVAILABILITY_MIN_ETC).clamp(0, AVAILABILITY_MAX_INDEX as i64) as usize
}

/// Availability factor (f) for a crop group and table column.
///
/// Out-of-range groups fall back to the default group; out-of-range columns
/// saturate at the last column.
pub fn availability_factor(group: u8, index: usize) -> f64 {
    let group = if (1..=4).contains(&group) {
        group
    } else {
        DEFAULT_CROP_GROUP
    };
    AVAILABILITY_FACTOR[group as usize - 1][index.min(AVAILABILITY_MAX_INDEX)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_coefficient_defaults_for_other() {
        assert_eq!(crop_coefficient_or_default(CropKind::Bean), 1.10);
        assert_eq!(crop_coefficient_or_default(CropKind::Corn), 1.20);
        assert_eq!(crop_coefficient(CropKind::Other), None);
        assert_eq!(
            crop_coefficient_or_default(CropKind::Other),
            DEFAULT_CROP_COEFFICIENT
        );
    }

    #[test]
    fn soil_frequency_table() {
        assert_eq!(irrigation_frequency_or_default(Some(SoilKind::Sandy)), 2);
        assert_eq!(irrigation_frequency_or_default(Some(SoilKind::Loam)), 3);
        assert_eq!(irrigation_frequency_or_default(Some(SoilKind::Clay)), 5);
        // Textures without a fixed interval use the default
        assert_eq!(irrigation_frequency_or_default(Some(SoilKind::SandyLoam)), 3);
        assert_eq!(irrigation_frequency_or_default(None), 3);
    }

    #[test]
    fn water_capacity_defaults_to_loam() {
        assert_eq!(available_water_capacity_or_default(Some(SoilKind::Sandy)), 85.0);
        assert_eq!(
            available_water_capacity_or_default(None),
            available_water_capacity(SoilKind::Loam).unwrap()
        );
    }

    #[test]
    fn root_depth_and_group_defaults() {
        assert_eq!(root_depth_or_default(CropKind::Bean), 25.0);
        assert_eq!(root_depth_or_default(CropKind::Other), DEFAULT_ROOT_DEPTH_CM);
        assert_eq!(crop_group_or_default(CropKind::Bean), 3);
        assert_eq!(crop_group_or_default(CropKind::Corn), 4);
        assert_eq!(crop_group_or_default(CropKind::Other), DEFAULT_CROP_GROUP);
    }

    #[test]
    fn system_efficiency_table() {
        assert_eq!(system_efficiency_or_default(SystemKind::FixedSprinkler), 0.75);
        assert_eq!(system_efficiency_or_default(SystemKind::CenterPivot), 0.85);
        assert_eq!(system_efficiency_or_default(SystemKind::Drip), 0.90);
    }

    #[test]
    fn etc_index_clamps_at_both_edges() {
        // 0.5 rounds to 1 (half away from zero), still below the table start
        assert_eq!(etc_index(0.5), 0);
        assert_eq!(etc_index(0.0), 0);
        assert_eq!(etc_index(2.0), 0);
        assert_eq!(etc_index(4.82), 3);
        assert_eq!(etc_index(10.0), 8);
        assert_eq!(etc_index(50.0), 8);
    }

    #[test]
    fn availability_factor_lookup() {
        assert_eq!(availability_factor(3, 3), 0.50);
        assert_eq!(availability_factor(1, 0), 0.50);
        assert_eq!(availability_factor(4, 8), 0.40);
        // Unknown group uses the default row
        assert_eq!(availability_factor(9, 3), availability_factor(DEFAULT_CROP_GROUP, 3));
        assert_eq!(availability_factor(2, 42), availability_factor(2, 8));
    }

    #[test]
    fn availability_factor_decreases_with_demand() {
        for group in 1..=4u8 {
            for index in 1..=AVAILABILITY_MAX_INDEX {
                assert!(availability_factor(group, index) <= availability_factor(group, index - 1));
            }
        }
    }
}
