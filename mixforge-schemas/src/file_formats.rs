use crate::{
    feature::FeatureRange,
    mix::MixDesign,
    model::{ModelMetadata, RegressionTree},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A serialized tree-ensemble strength model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub schema_version: String,
    /// Column order the ensemble was fitted with.
    pub feature_names: Vec<String>,
    /// Training min/max per column name.
    #[serde(default)]
    pub column_ranges: BTreeMap<String, FeatureRange>,
    #[serde(default)]
    pub metadata: ModelMetadata,
    pub trees: Vec<RegressionTree>,
}

#[derive(Debug, Deserialize)]
pub struct MixFile {
    pub schema_version: String,
    pub mix: MixDesign,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TreeNode;

    #[test]
    fn parses_model_artifact_json() {
        let json = r#"{
            "schema_version": "1.0",
            "feature_names": ["cement", "blast_furnace_slag", "fly_ash", "water",
                              "superplasticizer", "coarse_aggregate", "fine_aggregate", "age"],
            "column_ranges": { "cement": { "min": 102.0, "max": 540.0 } },
            "metadata": { "algorithm": "RandomForestRegressor", "training_samples": 1030 },
            "trees": [
                { "nodes": [
                    { "type": "split", "feature": 0, "threshold": 300.0, "left": 1, "right": 2 },
                    { "type": "leaf", "value": 25.0 },
                    { "type": "leaf", "value": 45.0 }
                ] }
            ]
        }"#;
        let artifact: ModelArtifact = serde_json::from_str(json).unwrap();
        assert_eq!(artifact.feature_names.len(), 8);
        assert_eq!(artifact.column_ranges["cement"].max, 540.0);
        assert_eq!(artifact.metadata.training_samples, Some(1030));
        assert_eq!(artifact.trees[0].nodes[1], TreeNode::Leaf { value: 25.0 });
    }

    #[test]
    fn optional_sections_default() {
        let json = r#"{ "schema_version": "1.0", "feature_names": [], "trees": [] }"#;
        let artifact: ModelArtifact = serde_json::from_str(json).unwrap();
        assert!(artifact.column_ranges.is_empty());
        assert_eq!(artifact.metadata, ModelMetadata::default());
    }
}
