use serde::{Deserialize, Serialize};
use std::fmt;

/// An optimisation hint attached to a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suggestion {
    ReduceWater,
    ImproveWorkability,
    IncreaseCement,
    OptimizeCementUsage,
    AddSupplementaryMaterials,
    ExtendCuring,
    /// Emitted alone when no other hint applies.
    WellOptimized,
}

impl Suggestion {
    pub fn title(self) -> &'static str {
        match self {
            Suggestion::ReduceWater => "Reduce water content",
            Suggestion::ImproveWorkability => "Increase workability",
            Suggestion::IncreaseCement => "Increase cement content",
            Suggestion::OptimizeCementUsage => "Optimize cement usage",
            Suggestion::AddSupplementaryMaterials => "Add supplementary materials",
            Suggestion::ExtendCuring => "Increase curing time",
            Suggestion::WellOptimized => "Well-optimized",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Suggestion::ReduceWater => {
                "Current W/C ratio is high (>0.55). Reduce water by 10-15% to increase strength."
            }
            Suggestion::ImproveWorkability => {
                "Very low W/C ratio (<0.35) may cause placement issues. Consider adding superplasticizer and reviewing workability."
            }
            Suggestion::IncreaseCement => {
                "For structural applications, consider increasing cement to 300+ kg/m³."
            }
            Suggestion::OptimizeCementUsage => {
                "High cement content increases cost. Consider substituting supplementary materials."
            }
            Suggestion::AddSupplementaryMaterials => {
                "Consider adding slag or fly ash (50-100 kg/m³) to improve durability and reduce cost."
            }
            Suggestion::ExtendCuring => {
                "Strength develops over time. 28-day strength is standard for design."
            }
            Suggestion::WellOptimized => "Your mix design appears well-optimized!",
        }
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.title(), self.message())
    }
}
