use crate::error::{DomainViolation, MixforgeError};
use mixforge_schemas::{
    feature::MixFeature,
    mix::{DerivedMetrics, MixDesign},
};

/// Computes ratios and totals for a mix.
///
/// A zero denominator yields a ratio of 0 instead of an error; out-of-domain
/// mixes are rejected earlier by [`validate_mix`] when evaluated.
pub fn compute_derived_metrics(mix: &MixDesign) -> DerivedMetrics {
    DerivedMetrics {
        water_cement_ratio: ratio_or_zero(mix.water, mix.cement),
        total_cementitious: mix.cement + mix.blast_furnace_slag + mix.fly_ash,
        total_aggregate: mix.coarse_aggregate + mix.fine_aggregate,
        aggregate_ratio: ratio_or_zero(mix.coarse_aggregate, mix.fine_aggregate),
    }
}

fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Checks every input against its documented domain, reporting all violations at once.
pub fn validate_mix(mix: &MixDesign) -> Result<(), MixforgeError> {
    let violations: Vec<DomainViolation> = MixFeature::ALL
        .iter()
        .filter_map(|&feature| {
            let value = mix.value(feature);
            let domain = feature.domain();
            (!domain.contains(value)).then_some(DomainViolation {
                feature,
                value,
                domain,
            })
        })
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(MixforgeError::InvalidMixDesign(violations))
    }
}
