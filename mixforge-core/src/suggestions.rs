use crate::classification::{WATER_CEMENT_HIGH, WATER_CEMENT_LOW};
use mixforge_schemas::{
    mix::{DerivedMetrics, MixDesign},
    suggestion::Suggestion,
};

const LOW_CEMENT_KG: f64 = 250.0;
const LOW_CEMENT_STRENGTH_MPA: f64 = 30.0;
const HIGH_CEMENT_KG: f64 = 400.0;
const DESIGN_AGE_DAYS: u32 = 28;

/// Applies each rule independently, in a fixed order.
///
/// Never returns an empty list: a mix that triggers nothing gets
/// [`Suggestion::WellOptimized`].
pub fn generate_suggestions(
    mix: &MixDesign,
    derived: &DerivedMetrics,
    predicted_strength: f64,
) -> Vec<Suggestion> {
    let rules: [(bool, Suggestion); 6] = [
        (
            derived.water_cement_ratio > WATER_CEMENT_HIGH,
            Suggestion::ReduceWater,
        ),
        (
            derived.water_cement_ratio < WATER_CEMENT_LOW,
            Suggestion::ImproveWorkability,
        ),
        (
            mix.cement < LOW_CEMENT_KG && predicted_strength < LOW_CEMENT_STRENGTH_MPA,
            Suggestion::IncreaseCement,
        ),
        (mix.cement > HIGH_CEMENT_KG, Suggestion::OptimizeCementUsage),
        (
            mix.blast_furnace_slag == 0.0 && mix.fly_ash == 0.0,
            Suggestion::AddSupplementaryMaterials,
        ),
        (
            mix.curing_age_days < DESIGN_AGE_DAYS,
            Suggestion::ExtendCuring,
        ),
    ];

    let suggestions: Vec<Suggestion> = rules
        .into_iter()
        .filter_map(|(triggered, suggestion)| triggered.then_some(suggestion))
        .collect();

    if suggestions.is_empty() {
        vec![Suggestion::WellOptimized]
    } else {
        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::compute_derived_metrics;

    fn balanced_mix() -> MixDesign {
        MixDesign {
            cement: 350.0,
            blast_furnace_slag: 60.0,
            fly_ash: 40.0,
            water: 160.0,
            superplasticizer: 6.0,
            coarse_aggregate: 1000.0,
            fine_aggregate: 750.0,
            curing_age_days: 28,
        }
    }

    fn suggest(mix: &MixDesign, strength: f64) -> Vec<Suggestion> {
        generate_suggestions(mix, &compute_derived_metrics(mix), strength)
    }

    #[test]
    fn balanced_mix_is_well_optimized() {
        assert_eq!(suggest(&balanced_mix(), 42.0), vec![Suggestion::WellOptimized]);
    }

    #[test]
    fn high_water_cement_ratio_comes_first() {
        let mix = MixDesign::default();
        let suggestions = suggest(&mix, 38.0);
        assert_eq!(suggestions.first(), Some(&Suggestion::ReduceWater));
        assert_eq!(suggestions, vec![Suggestion::ReduceWater]);
    }

    #[test]
    fn low_water_cement_ratio_asks_for_workability() {
        let mix = MixDesign {
            cement: 500.0,
            water: 150.0,
            ..balanced_mix()
        };
        assert_eq!(
            suggest(&mix, 65.0),
            vec![Suggestion::ImproveWorkability, Suggestion::OptimizeCementUsage]
        );
    }

    #[test]
    fn missing_supplementary_material_is_always_flagged() {
        for mix in [
            MixDesign {
                blast_furnace_slag: 0.0,
                fly_ash: 0.0,
                ..balanced_mix()
            },
            MixDesign {
                blast_furnace_slag: 0.0,
                fly_ash: 0.0,
                ..MixDesign::default()
            },
        ] {
            for strength in [10.0, 40.0, 70.0] {
                assert!(suggest(&mix, strength).contains(&Suggestion::AddSupplementaryMaterials));
            }
        }
    }

    #[test]
    fn low_cement_needs_low_strength_too() {
        let mix = MixDesign {
            cement: 240.0,
            water: 110.0,
            ..balanced_mix()
        };
        assert!(suggest(&mix, 29.9).contains(&Suggestion::IncreaseCement));
        assert!(!suggest(&mix, 30.0).contains(&Suggestion::IncreaseCement));
    }

    #[test]
    fn all_rules_keep_their_order() {
        let mix = MixDesign {
            cement: 200.0,
            blast_furnace_slag: 0.0,
            fly_ash: 0.0,
            water: 200.0,
            curing_age_days: 7,
            ..balanced_mix()
        };
        assert_eq!(
            suggest(&mix, 12.0),
            vec![
                Suggestion::ReduceWater,
                Suggestion::IncreaseCement,
                Suggestion::AddSupplementaryMaterials,
                Suggestion::ExtendCuring,
            ]
        );
    }

    #[test]
    fn early_age_mentions_design_age() {
        let mix = MixDesign {
            curing_age_days: 27,
            ..balanced_mix()
        };
        assert_eq!(suggest(&mix, 45.0), vec![Suggestion::ExtendCuring]);
    }
}
