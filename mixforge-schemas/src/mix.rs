use crate::feature::{FeatureVector, MixFeature};
use serde::{Deserialize, Serialize};

/// Proportions of one concrete formulation, per cubic metre of concrete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixDesign {
    pub cement: f64,
    #[serde(alias = "slag", alias = "blast_slag")]
    pub blast_furnace_slag: f64,
    pub fly_ash: f64,
    pub water: f64,
    pub superplasticizer: f64,
    #[serde(alias = "coarse_agg")]
    pub coarse_aggregate: f64,
    #[serde(alias = "fine_agg")]
    pub fine_aggregate: f64,
    #[serde(rename = "age", alias = "curing_age_days")]
    pub curing_age_days: u32,
}

impl Default for MixDesign {
    /// A typical 28-day structural mix.
    fn default() -> Self {
        Self {
            cement: 300.0,
            blast_furnace_slag: 50.0,
            fly_ash: 30.0,
            water: 180.0,
            superplasticizer: 5.0,
            coarse_aggregate: 900.0,
            fine_aggregate: 700.0,
            curing_age_days: 28,
        }
    }
}

impl MixDesign {
    pub fn value(&self, feature: MixFeature) -> f64 {
        match feature {
            MixFeature::Cement => self.cement,
            MixFeature::BlastFurnaceSlag => self.blast_furnace_slag,
            MixFeature::FlyAsh => self.fly_ash,
            MixFeature::Water => self.water,
            MixFeature::Superplasticizer => self.superplasticizer,
            MixFeature::CoarseAggregate => self.coarse_aggregate,
            MixFeature::FineAggregate => self.fine_aggregate,
            MixFeature::CuringAge => f64::from(self.curing_age_days),
        }
    }

    /// Builds the model input in [`MixFeature::ALL`] order.
    pub fn feature_vector(&self) -> FeatureVector {
        MixFeature::ALL.map(|feature| self.value(feature))
    }
}

/// Ratios and totals derived from a [`MixDesign`]. Recomputed on every evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub water_cement_ratio: f64,
    pub total_cementitious: f64,
    pub total_aggregate: f64,
    pub aggregate_ratio: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_vector_follows_model_order() {
        let mix = MixDesign {
            cement: 1.0,
            blast_furnace_slag: 2.0,
            fly_ash: 3.0,
            water: 4.0,
            superplasticizer: 5.0,
            coarse_aggregate: 6.0,
            fine_aggregate: 7.0,
            curing_age_days: 8,
        };
        assert_eq!(mix.feature_vector(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn deserializes_training_column_names() {
        let yaml = "
cement: 540
blast_furnace_slag: 0
fly_ash: 0
water: 162
superplasticizer: 2.5
coarse_aggregate: 1040
fine_aggregate: 676
age: 28
";
        let mix: MixDesign = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(mix.cement, 540.0);
        assert_eq!(mix.curing_age_days, 28);
    }

    #[test]
    fn deserializes_short_aliases() {
        let json = r#"{"cement":300,"slag":50,"fly_ash":30,"water":180,
            "superplasticizer":5.0,"coarse_agg":900,"fine_agg":700,"curing_age_days":7}"#;
        let mix: MixDesign = serde_json::from_str(json).unwrap();
        assert_eq!(mix.blast_furnace_slag, 50.0);
        assert_eq!(mix.curing_age_days, 7);
    }
}
