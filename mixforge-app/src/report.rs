//! Text and JSON rendering of evaluation results.

use anyhow::Result;
use mixforge_core::{ForestPredictor, PredictionResult};
use mixforge_schemas::{feature::MixFeature, mix::MixDesign};
use serde::Serialize;

#[derive(Serialize)]
struct JsonReport<'a> {
    mix: &'a MixDesign,
    result: &'a PredictionResult,
}

pub fn render_json(mix: &MixDesign, result: &PredictionResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(&JsonReport { mix, result })?)
}

pub fn render_text(mix: &MixDesign, result: &PredictionResult) -> String {
    let mut out = String::new();
    let derived = &result.derived;

    out.push_str("========================================\n");
    out.push_str("Mix Parameters:\n");
    for feature in MixFeature::ALL {
        out.push_str(&format!(
            "  - {:<20} {:>8.1} {}\n",
            feature.label(),
            mix.value(feature),
            feature.unit()
        ));
    }

    out.push_str("\nDerived Metrics:\n");
    out.push_str(&format!(
        "  - Water-Cement Ratio:  {:.3} ({})\n",
        derived.water_cement_ratio, result.water_cement_band
    ));
    out.push_str(&format!("      {}\n", result.water_cement_band.advisory()));
    out.push_str(&format!(
        "  - Total Cementitious:  {:.1} kg/m³\n",
        derived.total_cementitious
    ));
    out.push_str(&format!(
        "  - Total Aggregate:     {:.1} kg/m³\n",
        derived.total_aggregate
    ));
    out.push_str(&format!(
        "  - Coarse/Fine Ratio:   {:.3}\n",
        derived.aggregate_ratio
    ));

    let class = result.strength_class;
    out.push_str("----------------------------------------\n");
    out.push_str(&format!(
        "Predicted Strength:      {:.1} MPa\n",
        result.predicted_strength_mpa
    ));
    out.push_str(&format!(
        "Classification:          {} ({})\n",
        class,
        class.category()
    ));

    out.push_str(&format!(
        "\n{} Concrete ({}):\n",
        class.display_name(),
        class.band_label()
    ));
    out.push_str(&format!("  - Applications: {}\n", class.applications()));
    out.push_str(&format!("  - Advantages:   {}\n", class.advantages()));

    if !result.out_of_training_range.is_empty() {
        let names: Vec<&str> = result
            .out_of_training_range
            .iter()
            .map(|f| f.label())
            .collect();
        out.push_str(&format!(
            "\nNote: {} outside the model's training data; the prediction is extrapolated.\n",
            names.join(", ")
        ));
    }

    out.push_str("\nOptimization Suggestions:\n");
    for suggestion in &result.suggestions {
        out.push_str(&format!("  - {}\n", suggestion));
    }
    out.push_str("========================================\n");
    out
}

pub fn render_model_info(predictor: &ForestPredictor) -> String {
    let metadata = predictor.metadata();
    let mut out = String::new();
    out.push_str("Strength Model:\n");
    out.push_str(&format!(
        "  - Algorithm:        {}\n",
        metadata.algorithm.as_deref().unwrap_or("Random Forest")
    ));
    out.push_str(&format!("  - Trees:            {}\n", predictor.tree_count()));
    if let Some(r2) = metadata.r2_score {
        out.push_str(&format!("  - R² Score:         {:.3}\n", r2));
    }
    if let Some(mae) = metadata.mean_absolute_error_mpa {
        out.push_str(&format!("  - Mean Abs. Error:  ±{:.1} MPa\n", mae));
    }
    if let Some(samples) = metadata.training_samples {
        out.push_str(&format!("  - Training Samples: {}\n", samples));
    }
    if let Some(trained_at) = &metadata.trained_at {
        out.push_str(&format!("  - Trained At:       {}\n", trained_at));
    }
    let order: Vec<&str> = predictor
        .column_order()
        .iter()
        .map(|f| f.column_name())
        .collect();
    out.push_str(&format!("  - Feature Order:    {}\n", order.join(", ")));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use mixforge_core::{MixEvaluator, Predictor};
    use mixforge_schemas::feature::FeatureVector;

    struct FixedPredictor(f64);

    impl Predictor for FixedPredictor {
        fn predict(&self, _features: &FeatureVector) -> f64 {
            self.0
        }
    }

    #[test]
    fn text_report_lists_classification_and_suggestions() {
        let mix = MixDesign::default();
        let result = MixEvaluator::new(FixedPredictor(27.5)).evaluate(&mix).unwrap();
        let text = render_text(&mix, &result);

        assert!(text.contains("Predicted Strength:      27.5 MPa"));
        assert!(text.contains("Medium (Residential)"));
        assert!(text.contains("Water-Cement Ratio:  0.600 (High)"));
        assert!(text.contains("Reduce water content"));
        assert!(!text.contains("extrapolated"));
    }

    #[test]
    fn json_report_contains_mix_and_result() {
        let mix = MixDesign::default();
        let result = MixEvaluator::new(FixedPredictor(55.0)).evaluate(&mix).unwrap();
        let value: serde_json::Value = serde_json::from_str(&render_json(&mix, &result).unwrap()).unwrap();

        assert_eq!(value["mix"]["age"], 28);
        assert_eq!(value["result"]["strength_class"], "high");
        assert_eq!(value["result"]["suggestions"][0], "reduce_water");
    }
}
