use crate::error::MixforgeError;
use mixforge_schemas::{
    feature::{FeatureRange, FeatureVector, MixFeature, FEATURE_COUNT},
    file_formats::ModelArtifact,
    model::{ModelMetadata, RegressionTree, TreeNode},
};
use std::{collections::HashMap, fs, path::Path, sync::Arc};
use tracing::{info, warn};

const SUPPORTED_SCHEMA_MAJOR: &str = "1";

/// A fitted compressive-strength model.
///
/// `features` is always in [`MixFeature::ALL`] order; implementations that were
/// fitted with another column order must rearrange it themselves.
pub trait Predictor {
    /// Predicted compressive strength in MPa.
    fn predict(&self, features: &FeatureVector) -> f64;

    /// Range of `feature` seen during training, when the model records it.
    fn training_range(&self, _feature: MixFeature) -> Option<FeatureRange> {
        None
    }
}

impl<P: Predictor + ?Sized> Predictor for &P {
    fn predict(&self, features: &FeatureVector) -> f64 {
        (**self).predict(features)
    }

    fn training_range(&self, feature: MixFeature) -> Option<FeatureRange> {
        (**self).training_range(feature)
    }
}

impl<P: Predictor + ?Sized> Predictor for Box<P> {
    fn predict(&self, features: &FeatureVector) -> f64 {
        (**self).predict(features)
    }

    fn training_range(&self, feature: MixFeature) -> Option<FeatureRange> {
        (**self).training_range(feature)
    }
}

impl<P: Predictor + ?Sized> Predictor for Arc<P> {
    fn predict(&self, features: &FeatureVector) -> f64 {
        (**self).predict(features)
    }

    fn training_range(&self, feature: MixFeature) -> Option<FeatureRange> {
        (**self).training_range(feature)
    }
}

/// Random-forest regressor: the mean of its regression trees.
#[derive(Debug, Clone)]
pub struct ForestPredictor {
    trees: Vec<RegressionTree>,
    /// Feature held by each column of the fitted model.
    column_order: [MixFeature; FEATURE_COUNT],
    training_ranges: HashMap<MixFeature, FeatureRange>,
    metadata: ModelMetadata,
}

impl ForestPredictor {
    /// Loads and validates a JSON model artifact.
    ///
    /// # Errors
    ///
    /// Every failure, from a missing file to a malformed tree, is reported as
    /// [`MixforgeError::ModelUnavailable`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MixforgeError> {
        let path = path.as_ref();

        let predictor = Self::read_artifact(path)
            .and_then(Self::from_artifact)
            .map_err(|e| match e {
                MixforgeError::ModelUnavailable(_) => e,
                MixforgeError::InvalidModel(_) => {
                    MixforgeError::ModelUnavailable(format!("{} ({})", e, path.display()))
                }
                other => MixforgeError::ModelUnavailable(other.to_string()),
            })?;

        info!(
            path = %path.display(),
            trees = predictor.tree_count(),
            "strength model loaded"
        );
        Ok(predictor)
    }

    fn read_artifact(path: &Path) -> Result<ModelArtifact, MixforgeError> {
        let path_str = path.display().to_string();
        let content =
            fs::read_to_string(path).map_err(|e| MixforgeError::FileIO(path_str.clone(), e))?;
        serde_json::from_str(&content).map_err(|e| MixforgeError::JsonParsing(path_str, e))
    }

    /// Builds a predictor from an in-memory artifact.
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, MixforgeError> {
        if artifact.schema_version.split('.').next() != Some(SUPPORTED_SCHEMA_MAJOR) {
            return Err(MixforgeError::InvalidModel(format!(
                "unsupported schema version '{}'",
                artifact.schema_version
            )));
        }

        let column_order = resolve_column_order(&artifact.feature_names)?;

        if artifact.trees.is_empty() {
            return Err(MixforgeError::InvalidModel("ensemble has no trees".to_string()));
        }
        for (index, tree) in artifact.trees.iter().enumerate() {
            validate_tree(tree).map_err(|reason| {
                MixforgeError::InvalidModel(format!("tree {}: {}", index, reason))
            })?;
        }

        let mut training_ranges = HashMap::new();
        for (name, range) in &artifact.column_ranges {
            let Some(feature) = MixFeature::from_name(name) else {
                warn!(column = %name, "ignoring training range for unknown column");
                continue;
            };
            if !range.min.is_finite() || !range.max.is_finite() || range.min > range.max {
                return Err(MixforgeError::InvalidModel(format!(
                    "invalid training range for '{}': [{}, {}]",
                    name, range.min, range.max
                )));
            }
            training_ranges.insert(feature, *range);
        }

        Ok(Self {
            trees: artifact.trees,
            column_order,
            training_ranges,
            metadata: artifact.metadata,
        })
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Column order the ensemble was fitted with.
    pub fn column_order(&self) -> &[MixFeature; FEATURE_COUNT] {
        &self.column_order
    }

    fn predict_tree(tree: &RegressionTree, columns: &FeatureVector) -> f64 {
        let mut index = 0;
        loop {
            match &tree.nodes[index] {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if columns[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

impl Predictor for ForestPredictor {
    fn predict(&self, features: &FeatureVector) -> f64 {
        let columns: FeatureVector = self.column_order.map(|feature| features[feature.index()]);
        let total: f64 = self
            .trees
            .iter()
            .map(|tree| Self::predict_tree(tree, &columns))
            .sum();
        total / self.trees.len() as f64
    }

    fn training_range(&self, feature: MixFeature) -> Option<FeatureRange> {
        self.training_ranges.get(&feature).copied()
    }
}

fn resolve_column_order(names: &[String]) -> Result<[MixFeature; FEATURE_COUNT], MixforgeError> {
    if names.len() != FEATURE_COUNT {
        return Err(MixforgeError::InvalidModel(format!(
            "expected {} feature names, found {}",
            FEATURE_COUNT,
            names.len()
        )));
    }

    let mut order = MixFeature::ALL;
    let mut seen = [false; FEATURE_COUNT];
    for (column, name) in names.iter().enumerate() {
        let feature = MixFeature::from_name(name)
            .ok_or_else(|| MixforgeError::InvalidModel(format!("unknown feature '{}'", name)))?;
        if seen[feature.index()] {
            return Err(MixforgeError::InvalidModel(format!(
                "duplicate feature '{}'",
                name
            )));
        }
        seen[feature.index()] = true;
        order[column] = feature;
    }
    Ok(order)
}

/// Children must come after their parent, which rules out cycles.
fn validate_tree(tree: &RegressionTree) -> Result<(), String> {
    if tree.nodes.is_empty() {
        return Err("no nodes".to_string());
    }
    let node_count = tree.nodes.len();
    for (index, node) in tree.nodes.iter().enumerate() {
        match node {
            TreeNode::Leaf { value } => {
                if !value.is_finite() {
                    return Err(format!("node {} has a non-finite leaf value", index));
                }
            }
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if *feature >= FEATURE_COUNT {
                    return Err(format!("node {} splits on feature {}", index, feature));
                }
                if !threshold.is_finite() {
                    return Err(format!("node {} has a non-finite threshold", index));
                }
                for child in [*left, *right] {
                    if child <= index || child >= node_count {
                        return Err(format!("node {} has invalid child {}", index, child));
                    }
                }
            }
        }
    }
    Ok(())
}
