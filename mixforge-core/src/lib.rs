//! Concrete mix evaluation.
//!
//! A [`MixEvaluator`] owns a strength [`Predictor`] loaded once by the host and
//! turns each [`MixDesign`](mixforge_schemas::mix::MixDesign) into a
//! [`PredictionResult`]: derived ratios, predicted compressive strength, a
//! strength class and optimisation hints.

pub mod classification;
pub mod error;
pub mod evaluator;
pub mod logger;
pub mod metrics;
pub mod predictor;
pub mod suggestions;

pub use error::{MixforgeError, Result};
pub use evaluator::{predict_strength, MixEvaluator, PredictionResult};
pub use predictor::{ForestPredictor, Predictor};
