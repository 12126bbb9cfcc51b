use mixforge_schemas::feature::{FeatureRange, MixFeature};
use std::fmt;
use thiserror::Error;

/// One input field outside its accepted domain.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainViolation {
    pub feature: MixFeature,
    pub value: f64,
    pub domain: FeatureRange,
}

impl fmt::Display for DomainViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {} outside [{}, {}] {}",
            self.feature.column_name(),
            self.value,
            self.domain.min,
            self.domain.max,
            self.feature.unit()
        )
    }
}

fn join_violations(violations: &[DomainViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Error)]
pub enum MixforgeError {
    #[error("Prediction unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Invalid mix design: {}", join_violations(.0))]
    InvalidMixDesign(Vec<DomainViolation>),

    #[error("Model produced a non-finite strength prediction ({0})")]
    InvalidPrediction(f64),

    #[error("Invalid model artifact: {0}")]
    InvalidModel(String),

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to parse JSON from '{0}': {1}")]
    JsonParsing(String, #[source] serde_json::Error),

    #[error("Failed to process CSV file '{0}': {1}")]
    CsvError(String, #[source] csv::Error),

    #[error("An error occurred during logging: {0}")]
    LoggingError(#[from] anyhow::Error),
}

pub type Result<T, E = MixforgeError> = std::result::Result<T, E>;
