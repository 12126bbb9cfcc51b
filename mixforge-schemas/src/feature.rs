use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of inputs the strength model is fitted against.
pub const FEATURE_COUNT: usize = 8;

/// The mix quantities in the column order the strength model expects.
pub type FeatureVector = [f64; FEATURE_COUNT];

/// An inclusive `[min, max]` interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRange {
    pub min: f64,
    pub max: f64,
}

impl FeatureRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// NaN is never contained.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// One of the eight mix-design inputs.
///
/// The declaration order is the feature order of the model: reordering the
/// variants silently changes every prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MixFeature {
    Cement,
    BlastFurnaceSlag,
    FlyAsh,
    Water,
    Superplasticizer,
    CoarseAggregate,
    FineAggregate,
    #[serde(rename = "age")]
    CuringAge,
}

impl MixFeature {
    pub const ALL: [MixFeature; FEATURE_COUNT] = [
        MixFeature::Cement,
        MixFeature::BlastFurnaceSlag,
        MixFeature::FlyAsh,
        MixFeature::Water,
        MixFeature::Superplasticizer,
        MixFeature::CoarseAggregate,
        MixFeature::FineAggregate,
        MixFeature::CuringAge,
    ];

    /// Position of this feature in a [`FeatureVector`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column name used by the training data and model artifacts.
    pub fn column_name(self) -> &'static str {
        match self {
            MixFeature::Cement => "cement",
            MixFeature::BlastFurnaceSlag => "blast_furnace_slag",
            MixFeature::FlyAsh => "fly_ash",
            MixFeature::Water => "water",
            MixFeature::Superplasticizer => "superplasticizer",
            MixFeature::CoarseAggregate => "coarse_aggregate",
            MixFeature::FineAggregate => "fine_aggregate",
            MixFeature::CuringAge => "age",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MixFeature::Cement => "Cement",
            MixFeature::BlastFurnaceSlag => "Blast Furnace Slag",
            MixFeature::FlyAsh => "Fly Ash",
            MixFeature::Water => "Water",
            MixFeature::Superplasticizer => "Superplasticizer",
            MixFeature::CoarseAggregate => "Coarse Aggregate",
            MixFeature::FineAggregate => "Fine Aggregate",
            MixFeature::CuringAge => "Curing Age",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            MixFeature::CuringAge => "days",
            _ => "kg/m³",
        }
    }

    /// Accepted input domain. Values outside it never reach the model.
    pub fn domain(self) -> FeatureRange {
        match self {
            MixFeature::Cement => FeatureRange::new(100.0, 500.0),
            MixFeature::BlastFurnaceSlag => FeatureRange::new(0.0, 200.0),
            MixFeature::FlyAsh => FeatureRange::new(0.0, 150.0),
            MixFeature::Water => FeatureRange::new(100.0, 250.0),
            MixFeature::Superplasticizer => FeatureRange::new(0.0, 20.0),
            MixFeature::CoarseAggregate => FeatureRange::new(500.0, 1200.0),
            MixFeature::FineAggregate => FeatureRange::new(500.0, 1000.0),
            MixFeature::CuringAge => FeatureRange::new(1.0, 90.0),
        }
    }

    /// Resolves a column name, ignoring case and treating `-` and spaces as `_`.
    /// The common short forms found in concrete datasets are accepted too.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        match normalized.as_str() {
            "cement" => Some(MixFeature::Cement),
            "blast_furnace_slag" | "slag" | "blast_slag" => Some(MixFeature::BlastFurnaceSlag),
            "fly_ash" | "flyash" => Some(MixFeature::FlyAsh),
            "water" => Some(MixFeature::Water),
            "superplasticizer" => Some(MixFeature::Superplasticizer),
            "coarse_aggregate" | "coarse_agg" => Some(MixFeature::CoarseAggregate),
            "fine_aggregate" | "fine_agg" => Some(MixFeature::FineAggregate),
            "age" | "curing_age" | "curing_age_days" => Some(MixFeature::CuringAge),
            _ => None,
        }
    }
}

impl fmt::Display for MixFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}
