use mixforge_schemas::classification::{StrengthClass, WaterCementBand};

/// Above this W/C ratio the mix is water-rich.
pub const WATER_CEMENT_HIGH: f64 = 0.55;
/// Below this W/C ratio the mix is hard to place.
pub const WATER_CEMENT_LOW: f64 = 0.35;

/// Lower bound (inclusive, MPa) of each strength band, highest first.
/// The last entry catches everything below the others.
pub const STRENGTH_BANDS: [(f64, StrengthClass); 4] = [
    (50.0, StrengthClass::High),
    (35.0, StrengthClass::Standard),
    (25.0, StrengthClass::Medium),
    (f64::NEG_INFINITY, StrengthClass::Low),
];

/// Both cut points are exclusive, so 0.35 and 0.55 are `Optimal`.
pub fn classify_water_cement_ratio(ratio: f64) -> WaterCementBand {
    if ratio > WATER_CEMENT_HIGH {
        WaterCementBand::High
    } else if ratio < WATER_CEMENT_LOW {
        WaterCementBand::Low
    } else {
        WaterCementBand::Optimal
    }
}

/// A value sitting exactly on a band boundary belongs to the higher band.
pub fn classify_strength(mpa: f64) -> StrengthClass {
    STRENGTH_BANDS
        .iter()
        .find(|(lower_bound, _)| mpa >= *lower_bound)
        .map_or(StrengthClass::Low, |(_, class)| *class)
}
