use serde::{Deserialize, Serialize};

/// A node of an exported regression tree. Node 0 is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    /// Samples with `x[feature] <= threshold` descend to `left`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

/// Provenance and quality figures recorded by the training process.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelMetadata {
    #[serde(default)]
    pub algorithm: Option<String>,
    #[serde(default)]
    pub r2_score: Option<f64>,
    /// Mean absolute error on the hold-out set, in MPa.
    #[serde(default)]
    pub mean_absolute_error_mpa: Option<f64>,
    #[serde(default)]
    pub training_samples: Option<u64>,
    #[serde(default)]
    pub trained_at: Option<String>,
}
