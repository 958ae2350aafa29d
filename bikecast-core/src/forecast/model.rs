//! Serialized gradient-boosted tree ensemble — predict-only.
//!
//! The model artifact is produced offline by the training pipeline and loaded
//! here as an opaque predictor. The one contract the rest of the system relies
//! on: `predict_batch` returns exactly one value per input row, in row order.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::features::{build_features, FeatureMatrix};
use crate::reconcile::ReconciledSeries;

/// Structured errors for model loading and inference.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model artifact '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid model artifact: {0}")]
    Invalid(String),

    #[error("feature row has {got} columns, model expects {expected}")]
    FeatureWidth { expected: usize, got: usize },
}

/// One node of a regression tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
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

/// A single regression tree, stored as a flat node array rooted at index 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    /// Walk the tree for one feature row. The node array was validated at
    /// load time, so traversal cannot escape it.
    fn score(&self, row: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if row[*feature] < *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

/// Gradient-boosted ensemble: prediction = base score + sum of tree scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GbmModel {
    pub base_score: f64,
    pub n_features: usize,
    pub trees: Vec<Tree>,
}

impl GbmModel {
    /// Load and validate an artifact from disk.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let bytes = fs::read(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_slice(&bytes)
    }

    /// Parse and validate an artifact from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        let model: GbmModel = serde_json::from_slice(bytes)?;
        model.validate()?;
        Ok(model)
    }

    /// Structural validation: every split references an in-range feature and
    /// strictly-forward child indices (so traversal terminates).
    fn validate(&self) -> Result<(), ModelError> {
        for (t, tree) in self.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(ModelError::Invalid(format!("tree {t} has no nodes")));
            }
            for (n, node) in tree.nodes.iter().enumerate() {
                if let Node::Split {
                    feature,
                    left,
                    right,
                    ..
                } = node
                {
                    if *feature >= self.n_features {
                        return Err(ModelError::Invalid(format!(
                            "tree {t} node {n} references feature {feature}, model has {}",
                            self.n_features
                        )));
                    }
                    if *left >= tree.nodes.len() || *right >= tree.nodes.len() {
                        return Err(ModelError::Invalid(format!(
                            "tree {t} node {n} has out-of-range child"
                        )));
                    }
                    if *left <= n || *right <= n {
                        return Err(ModelError::Invalid(format!(
                            "tree {t} node {n} has non-forward child (cycle)"
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Predict one feature row.
    pub fn predict_row(&self, row: &[f64]) -> Result<f64, ModelError> {
        if row.len() != self.n_features {
            return Err(ModelError::FeatureWidth {
                expected: self.n_features,
                got: row.len(),
            });
        }
        Ok(self.base_score + self.trees.iter().map(|t| t.score(row)).sum::<f64>())
    }

    /// Predict every row of a feature matrix. Output length equals input
    /// length, same order.
    pub fn predict_batch(&self, matrix: &FeatureMatrix) -> Result<Vec<f64>, ModelError> {
        matrix.rows.iter().map(|r| self.predict_row(r)).collect()
    }

    /// Build features from a reconciled series and predict the whole column.
    pub fn forecast_series(&self, series: &ReconciledSeries) -> Result<Vec<f64>, ModelError> {
        self.predict_batch(&build_features(series))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact() -> &'static str {
        r#"{
            "base_score": 5.0,
            "n_features": 10,
            "trees": [
                { "nodes": [
                    { "kind": "split", "feature": 0, "threshold": 100.0, "left": 1, "right": 2 },
                    { "kind": "leaf", "value": -1.0 },
                    { "kind": "leaf", "value": 2.0 }
                ]},
                { "nodes": [ { "kind": "leaf", "value": 0.5 } ] }
            ]
        }"#
    }

    #[test]
    fn predicts_by_summing_trees() {
        let model = GbmModel::from_slice(artifact().as_bytes()).unwrap();
        let mut row = vec![0.0; 10];
        row[0] = 50.0; // left branch
        assert_eq!(model.predict_row(&row).unwrap(), 5.0 - 1.0 + 0.5);
        row[0] = 150.0; // right branch
        assert_eq!(model.predict_row(&row).unwrap(), 5.0 + 2.0 + 0.5);
    }

    #[test]
    fn batch_output_matches_input_length_and_order() {
        let model = GbmModel::from_slice(artifact().as_bytes()).unwrap();
        let mut low = vec![0.0; 10];
        low[0] = 50.0;
        let mut high = vec![0.0; 10];
        high[0] = 150.0;
        let matrix = FeatureMatrix {
            names: (0..10).map(|i| format!("f{i}")).collect(),
            rows: vec![low, high],
        };
        let out = model.predict_batch(&matrix).unwrap();
        assert_eq!(out.len(), 2);
        assert!(out[0] < out[1]);
    }

    #[test]
    fn wrong_feature_width_is_rejected() {
        let model = GbmModel::from_slice(artifact().as_bytes()).unwrap();
        let err = model.predict_row(&[1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            ModelError::FeatureWidth {
                expected: 10,
                got: 2
            }
        ));
    }

    #[test]
    fn out_of_range_feature_index_is_rejected_at_load() {
        let bad = r#"{
            "base_score": 0.0,
            "n_features": 1,
            "trees": [ { "nodes": [
                { "kind": "split", "feature": 5, "threshold": 0.0, "left": 1, "right": 2 },
                { "kind": "leaf", "value": 0.0 },
                { "kind": "leaf", "value": 0.0 }
            ]}]
        }"#;
        assert!(matches!(
            GbmModel::from_slice(bad.as_bytes()),
            Err(ModelError::Invalid(_))
        ));
    }

    #[test]
    fn backward_child_reference_is_rejected_at_load() {
        let bad = r#"{
            "base_score": 0.0,
            "n_features": 1,
            "trees": [ { "nodes": [
                { "kind": "split", "feature": 0, "threshold": 0.0, "left": 0, "right": 1 },
                { "kind": "leaf", "value": 0.0 }
            ]}]
        }"#;
        assert!(matches!(
            GbmModel::from_slice(bad.as_bytes()),
            Err(ModelError::Invalid(_))
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            GbmModel::from_slice(b"{ not json"),
            Err(ModelError::Parse(_))
        ));
    }
}
