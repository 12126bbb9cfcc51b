use serde::{Deserialize, Serialize};
use std::fmt;

/// Strength band of a predicted 28-day-style compressive strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthClass {
    Low,
    Medium,
    Standard,
    High,
}

impl StrengthClass {
    pub fn display_name(self) -> &'static str {
        match self {
            StrengthClass::High => "High-Strength",
            StrengthClass::Standard => "Standard",
            StrengthClass::Medium => "Medium",
            StrengthClass::Low => "Low",
        }
    }

    /// Typical usage category.
    pub fn category(self) -> &'static str {
        match self {
            StrengthClass::High => "Structural",
            StrengthClass::Standard => "Commercial",
            StrengthClass::Medium => "Residential",
            StrengthClass::Low => "Non-structural",
        }
    }

    pub fn band_label(self) -> &'static str {
        match self {
            StrengthClass::High => ">50 MPa",
            StrengthClass::Standard => "35-50 MPa",
            StrengthClass::Medium => "25-35 MPa",
            StrengthClass::Low => "<25 MPa",
        }
    }

    pub fn applications(self) -> &'static str {
        match self {
            StrengthClass::High => "Columns, beams, bridges, high-rise buildings",
            StrengthClass::Standard => "Commercial buildings, parking structures, slabs",
            StrengthClass::Medium => "Residential buildings, foundations, walls",
            StrengthClass::Low => "Non-structural elements, blinding concrete, fills",
        }
    }

    pub fn advantages(self) -> &'static str {
        match self {
            StrengthClass::High => "Higher load capacity, reduced member sizes",
            StrengthClass::Standard => "Good balance of strength and cost",
            StrengthClass::Medium => "Cost-effective for typical construction",
            StrengthClass::Low => "Economical for non-load-bearing applications",
        }
    }
}

impl fmt::Display for StrengthClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Position of a water-cement ratio relative to the strength/workability window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterCementBand {
    Low,
    Optimal,
    High,
}

impl WaterCementBand {
    pub fn advisory(self) -> &'static str {
        match self {
            WaterCementBand::High => "High W/C ratio - excess water reduces strength",
            WaterCementBand::Optimal => "W/C ratio within the 0.35-0.55 working range",
            WaterCementBand::Low => "Very low W/C ratio - workability and placement risk",
        }
    }
}

impl fmt::Display for WaterCementBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WaterCementBand::Low => "Low",
            WaterCementBand::Optimal => "Optimal",
            WaterCementBand::High => "High",
        };
        f.write_str(name)
    }
}
