use crate::{
    classification::{classify_strength, classify_water_cement_ratio},
    error::MixforgeError,
    metrics::{compute_derived_metrics, validate_mix},
    predictor::Predictor,
    suggestions::generate_suggestions,
};
use mixforge_schemas::{
    classification::{StrengthClass, WaterCementBand},
    feature::MixFeature,
    mix::{DerivedMetrics, MixDesign},
    suggestion::Suggestion,
};
use serde::Serialize;
use tracing::{debug, error, warn};

/// Outcome of one successful evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub predicted_strength_mpa: f64,
    pub strength_class: StrengthClass,
    pub suggestions: Vec<Suggestion>,
    pub derived: DerivedMetrics,
    pub water_cement_band: WaterCementBand,
    /// Inputs outside the range the model was trained on.
    pub out_of_training_range: Vec<MixFeature>,
}

/// Runs the model on the mix's feature vector.
pub fn predict_strength<P: Predictor + ?Sized>(mix: &MixDesign, predictor: &P) -> f64 {
    predictor.predict(&mix.feature_vector())
}

#[derive(Debug)]
enum ModelState<P> {
    Loaded(P),
    Unavailable(String),
}

/// Turns mix designs into strength predictions with a model loaded once by the host.
///
/// A model that failed to load stays unavailable for the lifetime of the
/// evaluator; every request fails fast with [`MixforgeError::ModelUnavailable`].
#[derive(Debug)]
pub struct MixEvaluator<P> {
    model: ModelState<P>,
}

impl<P: Predictor> MixEvaluator<P> {
    pub fn new(predictor: P) -> Self {
        Self {
            model: ModelState::Loaded(predictor),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            model: ModelState::Unavailable(reason.into()),
        }
    }

    /// Adopts the outcome of the host's start-up model load.
    pub fn from_load(loaded: Result<P, MixforgeError>) -> Self {
        match loaded {
            Ok(predictor) => Self::new(predictor),
            Err(MixforgeError::ModelUnavailable(reason)) => {
                error!(%reason, "strength model could not be loaded");
                Self::unavailable(reason)
            }
            Err(e) => {
                error!(error = %e, "strength model could not be loaded");
                Self::unavailable(e.to_string())
            }
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self.model, ModelState::Loaded(_))
    }

    pub fn predictor(&self) -> Option<&P> {
        match &self.model {
            ModelState::Loaded(predictor) => Some(predictor),
            ModelState::Unavailable(_) => None,
        }
    }

    /// Why the model is unavailable, if it is.
    pub fn unavailable_reason(&self) -> Option<&str> {
        match &self.model {
            ModelState::Loaded(_) => None,
            ModelState::Unavailable(reason) => Some(reason),
        }
    }

    fn loaded_predictor(&self) -> Result<&P, MixforgeError> {
        match &self.model {
            ModelState::Loaded(predictor) => Ok(predictor),
            ModelState::Unavailable(reason) => {
                Err(MixforgeError::ModelUnavailable(reason.clone()))
            }
        }
    }

    /// Predicted strength in MPa, without validation or classification.
    pub fn predict_strength(&self, mix: &MixDesign) -> Result<f64, MixforgeError> {
        let predictor = self.loaded_predictor()?;
        Ok(predict_strength(mix, predictor))
    }

    /// Validates, predicts, classifies and annotates one mix.
    ///
    /// # Errors
    ///
    /// - [`MixforgeError::ModelUnavailable`] before anything is computed when
    ///   no model is loaded.
    /// - [`MixforgeError::InvalidMixDesign`] when any input is outside its domain.
    /// - [`MixforgeError::InvalidPrediction`] when the model returns NaN or infinity.
    pub fn evaluate(&self, mix: &MixDesign) -> Result<PredictionResult, MixforgeError> {
        let predictor = self.loaded_predictor()?;
        validate_mix(mix)?;

        let derived = compute_derived_metrics(mix);
        let predicted = predict_strength(mix, predictor);
        if !predicted.is_finite() {
            return Err(MixforgeError::InvalidPrediction(predicted));
        }

        let out_of_training_range: Vec<MixFeature> = MixFeature::ALL
            .iter()
            .copied()
            .filter(|&feature| {
                predictor
                    .training_range(feature)
                    .map_or(false, |range| !range.contains(mix.value(feature)))
            })
            .collect();
        if !out_of_training_range.is_empty() {
            warn!(
                features = ?out_of_training_range,
                "mix lies outside the model's training range; prediction is extrapolated"
            );
        }

        let result = PredictionResult {
            predicted_strength_mpa: predicted,
            strength_class: classify_strength(predicted),
            suggestions: generate_suggestions(mix, &derived, predicted),
            derived,
            water_cement_band: classify_water_cement_ratio(derived.water_cement_ratio),
            out_of_training_range,
        };

        debug!(
            strength_mpa = result.predicted_strength_mpa,
            class = %result.strength_class,
            wc_ratio = result.derived.water_cement_ratio,
            "mix evaluated"
        );
        Ok(result)
    }
}
