use crate::{config::OutputFormat, report};
use anyhow::{Context, Result};
use mixforge_core::{logger::EvaluationLogger, MixEvaluator, MixforgeError, Predictor};
use mixforge_schemas::mix::MixDesign;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Per-field replacements applied on top of a base mix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MixOverrides {
    pub cement: Option<f64>,
    pub blast_furnace_slag: Option<f64>,
    pub fly_ash: Option<f64>,
    pub water: Option<f64>,
    pub superplasticizer: Option<f64>,
    pub coarse_aggregate: Option<f64>,
    pub fine_aggregate: Option<f64>,
    pub age: Option<u32>,
}

impl MixOverrides {
    pub fn apply(&self, mut mix: MixDesign) -> MixDesign {
        if let Some(v) = self.cement {
            mix.cement = v;
        }
        if let Some(v) = self.blast_furnace_slag {
            mix.blast_furnace_slag = v;
        }
        if let Some(v) = self.fly_ash {
            mix.fly_ash = v;
        }
        if let Some(v) = self.water {
            mix.water = v;
        }
        if let Some(v) = self.superplasticizer {
            mix.superplasticizer = v;
        }
        if let Some(v) = self.coarse_aggregate {
            mix.coarse_aggregate = v;
        }
        if let Some(v) = self.fine_aggregate {
            mix.fine_aggregate = v;
        }
        if let Some(v) = self.age {
            mix.curing_age_days = v;
        }
        mix
    }
}

/// Evaluates one mix and renders the report, appending to the evaluation log if given.
pub fn run_predict<P: Predictor>(
    evaluator: &MixEvaluator<P>,
    mix: &MixDesign,
    format: OutputFormat,
    log_path: Option<&Path>,
) -> Result<String> {
    let result = evaluator.evaluate(mix)?;

    if let Some(path) = log_path {
        let mut logger = EvaluationLogger::open(path)?;
        logger.log_evaluation(mix, &result)?;
        info!(path = %path.display(), "evaluation logged");
    }

    match format {
        OutputFormat::Text => Ok(report::render_text(mix, &result)),
        OutputFormat::Json => report::render_json(mix, &result),
    }
}

#[derive(Debug, Default, Serialize)]
struct BatchRow {
    row: usize,
    cement: Option<f64>,
    blast_furnace_slag: Option<f64>,
    fly_ash: Option<f64>,
    water: Option<f64>,
    superplasticizer: Option<f64>,
    coarse_aggregate: Option<f64>,
    fine_aggregate: Option<f64>,
    age: Option<u32>,
    water_cement_ratio: Option<f64>,
    predicted_strength_mpa: Option<f64>,
    strength_class: Option<String>,
    suggestions: String,
    error: String,
}

impl BatchRow {
    fn for_mix(row: usize, mix: &MixDesign) -> Self {
        Self {
            row,
            cement: Some(mix.cement),
            blast_furnace_slag: Some(mix.blast_furnace_slag),
            fly_ash: Some(mix.fly_ash),
            water: Some(mix.water),
            superplasticizer: Some(mix.superplasticizer),
            coarse_aggregate: Some(mix.coarse_aggregate),
            fine_aggregate: Some(mix.fine_aggregate),
            age: Some(mix.curing_age_days),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub evaluated: usize,
    pub failed: usize,
}

/// Evaluates every row of a mix CSV, one at a time, into a result CSV.
///
/// Rows that cannot be parsed or fail validation are written with an
/// `error` and do not stop the run. An unavailable model stops it before the
/// output file is created.
pub fn run_batch<P: Predictor>(
    evaluator: &MixEvaluator<P>,
    input: &Path,
    output: &Path,
) -> Result<BatchSummary> {
    if let Some(reason) = evaluator.unavailable_reason() {
        return Err(MixforgeError::ModelUnavailable(reason.to_string()).into());
    }

    let mut reader = csv::Reader::from_path(input)
        .with_context(|| format!("Failed to open batch input {:?}", input))?;
    let mut writer = csv::Writer::from_path(output)
        .with_context(|| format!("Failed to create batch output {:?}", output))?;
    let mut summary = BatchSummary {
        evaluated: 0,
        failed: 0,
    };

    for (index, record) in reader.deserialize::<MixDesign>().enumerate() {
        let row_number = index + 1;
        let row = match record {
            Ok(mix) => {
                let mut row = BatchRow::for_mix(row_number, &mix);
                match evaluator.evaluate(&mix) {
                    Ok(result) => {
                        row.water_cement_ratio = Some(result.derived.water_cement_ratio);
                        row.predicted_strength_mpa = Some(result.predicted_strength_mpa);
                        row.strength_class = Some(result.strength_class.to_string());
                        row.suggestions = result
                            .suggestions
                            .iter()
                            .map(|s| s.title())
                            .collect::<Vec<_>>()
                            .join("; ");
                    }
                    Err(e) => row.error = e.to_string(),
                }
                row
            }
            Err(e) => BatchRow {
                row: row_number,
                error: format!("Unreadable row: {}", e),
                ..Default::default()
            },
        };

        if row.error.is_empty() {
            summary.evaluated += 1;
        } else {
            summary.failed += 1;
        }
        writer
            .serialize(&row)
            .with_context(|| format!("Failed to write batch output {:?}", output))?;
    }
    writer.flush()?;

    info!(
        evaluated = summary.evaluated,
        failed = summary.failed,
        "batch evaluation complete"
    );
    Ok(summary)
}
