//! Classifier interface and model artifact loading
//!
//! The classifier is trained elsewhere and shipped as a JSON document. The
//! `"type"` field selects the model family:
//!
//! ```json
//! { "type": "logistic_regression", "n_features": 12,
//!   "coefficients": [0.1, 0.02, ...], "intercept": -1.5, "threshold": 0.5 }
//!
//! { "type": "decision_tree", "nodes": [
//!     { "feature": 8, "threshold": 1.5, "left": 1, "right": 2 },
//!     { "value": 0 },
//!     { "value": 1 } ] }
//!
//! { "type": "random_forest", "trees": [ { "nodes": [...] }, ... ] }
//!
//! { "type": "constant", "label": 1 }
//! ```
//!
//! Tree nodes follow the usual CART layout: samples with
//! `x[feature] <= threshold` go to `left`. Child indices must point forward
//! in the node array, which rules out cycles.

use crate::error::PredictorError;
use crate::features::encoder::FEATURE_COUNT;
use crate::features::input::FIELD_KEYS;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// A trained binary classifier
///
/// Implementations must be immutable after construction: one instance is
/// shared read-only by every request for the life of the process.
pub trait Classifier: Send + Sync + fmt::Debug {
    /// Number of columns a sample must have
    fn n_features(&self) -> usize;

    /// Predict one sample
    ///
    /// Returns the model output; the first element is the class label.
    fn predict(&self, sample: &[f64]) -> Result<Vec<f64>, PredictorError>;

    /// Short model description for result metadata
    fn name(&self) -> &str {
        "classifier"
    }
}

/// Logistic regression over the raw feature columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    /// One weight per feature
    pub coefficients: Vec<f64>,
    /// Bias term
    pub intercept: f64,
    /// Probability at or above which the label is 1 (default: 0.5)
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 {
    0.5
}

impl LogisticRegression {
    /// Linear score `w·x + b`
    pub fn score(&self, sample: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(sample.iter())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept
    }

    /// Probability of the positive class
    pub fn probability(&self, sample: &[f64]) -> f64 {
        1.0 / (1.0 + (-self.score(sample)).exp())
    }

    fn label(&self, sample: &[f64]) -> Result<f64, PredictorError> {
        let z = self.score(sample);
        if !z.is_finite() {
            return Err(PredictorError::InferenceError(format!(
                "logistic score is not finite ({})",
                z
            )));
        }
        let probability = 1.0 / (1.0 + (-z).exp());
        Ok(if probability >= self.threshold { 1.0 } else { 0.0 })
    }
}

/// Node of a flattened decision tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Internal split
    Split {
        /// Feature column tested
        feature: usize,
        /// Samples with `x[feature] <= threshold` go left
        threshold: f64,
        /// Index of the left child
        left: usize,
        /// Index of the right child
        right: usize,
    },
    /// Terminal node carrying a class label
    Leaf {
        /// Predicted label
        value: f64,
    },
}

/// Decision tree stored as a flat node array, root at index 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    /// Nodes, parents before children
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    fn validate(&self, n_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("decision tree has no nodes".to_string());
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(format!(
                            "node {} splits on feature {} but the model has {} features",
                            idx, feature, n_features
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {} has a non-finite threshold", idx));
                    }
                    for child in [left, right] {
                        if *child <= idx || *child >= self.nodes.len() {
                            return Err(format!(
                                "node {} points to invalid child {}",
                                idx, child
                            ));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(format!("leaf {} has a non-finite value", idx));
                    }
                }
            }
        }
        Ok(())
    }

    /// Walk the tree for one sample
    pub fn predict_label(&self, sample: &[f64]) -> Result<f64, PredictorError> {
        let mut idx = 0;
        // Children always point forward, so the walk ends within nodes.len() steps.
        for _ in 0..self.nodes.len() {
            match self.nodes.get(idx) {
                Some(TreeNode::Leaf { value }) => return Ok(*value),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let x = sample.get(*feature).copied().ok_or_else(|| {
                        PredictorError::InferenceError(format!(
                            "tree split on feature {} but sample has {} columns",
                            feature,
                            sample.len()
                        ))
                    })?;
                    idx = if x <= *threshold { *left } else { *right };
                }
                None => break,
            }
        }
        Err(PredictorError::InferenceError(format!(
            "decision tree walk left the node array at index {}",
            idx
        )))
    }
}

/// Majority vote over decision trees (ties resolve to 0)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    /// Member trees
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    fn label(&self, sample: &[f64]) -> Result<f64, PredictorError> {
        let mut positive = 0usize;
        for tree in &self.trees {
            if tree.predict_label(sample)? == 1.0 {
                positive += 1;
            }
        }
        Ok(if positive * 2 > self.trees.len() { 1.0 } else { 0.0 })
    }
}

/// Supported model families
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelKind {
    /// Linear model with sigmoid link
    LogisticRegression(LogisticRegression),
    /// Single CART tree
    DecisionTree(DecisionTree),
    /// Tree ensemble
    RandomForest(RandomForest),
    /// Fixed label, independent of input
    Constant {
        /// Label returned for every sample
        label: f64,
    },
}

impl ModelKind {
    fn family(&self) -> &'static str {
        match self {
            ModelKind::LogisticRegression(_) => "logistic_regression",
            ModelKind::DecisionTree(_) => "decision_tree",
            ModelKind::RandomForest(_) => "random_forest",
            ModelKind::Constant { .. } => "constant",
        }
    }
}

/// Deserialized model artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Declared input width; must equal 12 when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_features: Option<usize>,

    /// Declared column names; must match the form keys in order when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,

    /// The model itself
    #[serde(flatten)]
    pub model: ModelKind,
}

impl ModelArtifact {
    /// Wrap a model with no declared metadata
    pub fn new(model: ModelKind) -> Self {
        Self {
            n_features: None,
            feature_names: None,
            model,
        }
    }

    /// Load and validate an artifact from disk
    ///
    /// # Errors
    ///
    /// Returns `StartupError` if the file cannot be read, is not a valid
    /// artifact, or does not fit a twelve-column input.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PredictorError> {
        let path = path.as_ref();
        log::debug!("Loading model artifact from: {}", path.display());

        let text = std::fs::read_to_string(path).map_err(|e| {
            PredictorError::StartupError(format!(
                "cannot read model file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&text).map_err(|e| match e {
            PredictorError::StartupError(msg) => {
                PredictorError::StartupError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Parse and validate an artifact from a JSON string
    pub fn from_json(text: &str) -> Result<Self, PredictorError> {
        let artifact: ModelArtifact = serde_json::from_str(text).map_err(|e| {
            PredictorError::StartupError(format!("malformed model artifact: {}", e))
        })?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Structural checks run once at load time
    pub fn validate(&self) -> Result<(), PredictorError> {
        let startup = |msg: String| PredictorError::StartupError(msg);

        if let Some(n) = self.n_features {
            if n != FEATURE_COUNT {
                return Err(startup(format!(
                    "model expects {} features, shipments encode to {}",
                    n, FEATURE_COUNT
                )));
            }
        }

        if let Some(names) = &self.feature_names {
            if names.len() != FEATURE_COUNT
                || names.iter().zip(FIELD_KEYS.iter()).any(|(a, b)| a != b)
            {
                return Err(startup(format!(
                    "model feature names {:?} do not match the encoded column order",
                    names
                )));
            }
        }

        match &self.model {
            ModelKind::LogisticRegression(lr) => {
                if lr.coefficients.len() != FEATURE_COUNT {
                    return Err(startup(format!(
                        "logistic regression has {} coefficients, expected {}",
                        lr.coefficients.len(),
                        FEATURE_COUNT
                    )));
                }
                let all_finite = lr.coefficients.iter().all(|c| c.is_finite())
                    && lr.intercept.is_finite()
                    && lr.threshold.is_finite();
                if !all_finite {
                    return Err(startup(
                        "logistic regression has non-finite parameters".to_string(),
                    ));
                }
            }
            ModelKind::DecisionTree(tree) => tree.validate(FEATURE_COUNT).map_err(startup)?,
            ModelKind::RandomForest(forest) => {
                if forest.trees.is_empty() {
                    return Err(startup("random forest has no trees".to_string()));
                }
                for (i, tree) in forest.trees.iter().enumerate() {
                    tree.validate(FEATURE_COUNT)
                        .map_err(|e| startup(format!("tree {}: {}", i, e)))?;
                }
            }
            ModelKind::Constant { label } => {
                if !label.is_finite() {
                    return Err(startup("constant model has a non-finite label".to_string()));
                }
            }
        }
        Ok(())
    }
}

impl Classifier for ModelArtifact {
    fn n_features(&self) -> usize {
        FEATURE_COUNT
    }

    fn predict(&self, sample: &[f64]) -> Result<Vec<f64>, PredictorError> {
        if sample.len() != self.n_features() {
            return Err(PredictorError::InferenceError(format!(
                "expected {} features, got {}",
                self.n_features(),
                sample.len()
            )));
        }
        let label = match &self.model {
            ModelKind::LogisticRegression(lr) => lr.label(sample)?,
            ModelKind::DecisionTree(tree) => tree.predict_label(sample)?,
            ModelKind::RandomForest(forest) => forest.label(sample)?,
            ModelKind::Constant { label } => *label,
        };
        Ok(vec![label])
    }

    fn name(&self) -> &str {
        self.model.family()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE: [f64; 12] = [2.0, 5.0, 0.0, 120.0, 3.0, 1.0, 3.0, 2.0, 0.0, 0.0, 4.0, 1.0];

    fn weather_tree() -> DecisionTree {
        // Storm or snow (weather code >= 3) means delay.
        DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 8,
                    threshold: 2.5,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { value: 0.0 },
                TreeNode::Leaf { value: 1.0 },
            ],
        }
    }

    #[test]
    fn test_parse_decision_tree() {
        let json = r#"{
            "type": "decision_tree",
            "n_features": 12,
            "nodes": [
                {"feature": 8, "threshold": 2.5, "left": 1, "right": 2},
                {"value": 0},
                {"value": 1}
            ]
        }"#;
        let artifact = ModelArtifact::from_json(json).unwrap();
        assert_eq!(artifact.model, ModelKind::DecisionTree(weather_tree()));
        assert_eq!(artifact.name(), "decision_tree");
        assert_eq!(artifact.predict(&REFERENCE).unwrap(), vec![0.0]);

        let mut stormy = REFERENCE;
        stormy[8] = 4.0;
        assert_eq!(artifact.predict(&stormy).unwrap(), vec![1.0]);
    }

    #[test]
    fn test_logistic_regression() {
        let mut coefficients = vec![0.0; 12];
        coefficients[3] = 0.01; // distance
        let lr = LogisticRegression {
            coefficients,
            intercept: -1.0,
            threshold: 0.5,
        };
        // z = 1.2 - 1.0 = 0.2 > 0
        assert!(lr.probability(&REFERENCE) > 0.5);
        let artifact = ModelArtifact::new(ModelKind::LogisticRegression(lr));
        artifact.validate().unwrap();
        assert_eq!(artifact.predict(&REFERENCE).unwrap(), vec![1.0]);
    }

    #[test]
    fn test_logistic_overflow_is_error() {
        let mut coefficients = vec![0.0; 12];
        coefficients[1] = f64::MAX; // weight
        coefficients[3] = -f64::MAX; // distance
        let artifact = ModelArtifact::new(ModelKind::LogisticRegression(LogisticRegression {
            coefficients,
            intercept: 0.0,
            threshold: 0.5,
        }));
        artifact.validate().unwrap();
        let err = artifact.predict(&REFERENCE).unwrap_err();
        assert!(matches!(err, PredictorError::InferenceError(ref m) if m.contains("not finite")));
    }

    #[test]
    fn test_logistic_default_threshold() {
        let json = format!(
            r#"{{"type": "logistic_regression", "coefficients": {:?}, "intercept": -3.0}}"#,
            vec![0.0; 12]
        );
        let artifact = ModelArtifact::from_json(&json).unwrap();
        match &artifact.model {
            ModelKind::LogisticRegression(lr) => assert_eq!(lr.threshold, 0.5),
            other => panic!("unexpected model {:?}", other),
        }
        assert_eq!(artifact.predict(&REFERENCE).unwrap(), vec![0.0]);
    }

    #[test]
    fn test_random_forest_majority() {
        let delay = DecisionTree {
            nodes: vec![TreeNode::Leaf { value: 1.0 }],
        };
        let on_time = DecisionTree {
            nodes: vec![TreeNode::Leaf { value: 0.0 }],
        };

        let forest = ModelArtifact::new(ModelKind::RandomForest(RandomForest {
            trees: vec![delay.clone(), delay.clone(), on_time.clone()],
        }));
        assert_eq!(forest.predict(&REFERENCE).unwrap(), vec![1.0]);

        let tie = ModelArtifact::new(ModelKind::RandomForest(RandomForest {
            trees: vec![delay, on_time],
        }));
        assert_eq!(tie.predict(&REFERENCE).unwrap(), vec![0.0]);
    }

    #[test]
    fn test_wrong_width_rejected_at_predict() {
        let artifact = ModelArtifact::new(ModelKind::Constant { label: 1.0 });
        let err = artifact.predict(&[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, PredictorError::InferenceError(_)));
    }

    #[test]
    fn test_validation_failures_are_startup_errors() {
        let cases = [
            r#"{"type": "constant", "label": 1, "n_features": 11}"#,
            r#"{"type": "logistic_regression", "coefficients": [1.0], "intercept": 0.0}"#,
            r#"{"type": "decision_tree", "nodes": []}"#,
            r#"{"type": "decision_tree", "nodes": [{"feature": 12, "threshold": 1.0, "left": 1, "right": 2}, {"value": 0}, {"value": 1}]}"#,
            r#"{"type": "decision_tree", "nodes": [{"feature": 0, "threshold": 1.0, "left": 0, "right": 1}, {"value": 1}]}"#,
            r#"{"type": "random_forest", "trees": []}"#,
            r#"{"type": "gradient_boosting"}"#,
            r#"not json"#,
        ];
        for case in cases {
            let err = ModelArtifact::from_json(case).unwrap_err();
            assert!(err.is_fatal(), "expected startup error for {}: {:?}", case, err);
        }
    }

    #[test]
    fn test_feature_names_must_match_order() {
        let mut names: Vec<String> = FIELD_KEYS.iter().map(|s| s.to_string()).collect();
        let artifact = ModelArtifact {
            n_features: Some(12),
            feature_names: Some(names.clone()),
            model: ModelKind::Constant { label: 0.0 },
        };
        artifact.validate().unwrap();

        names.swap(6, 7);
        let swapped = ModelArtifact {
            feature_names: Some(names),
            ..artifact
        };
        assert!(swapped.validate().unwrap_err().is_fatal());
    }

    #[test]
    fn test_serialize_roundtrip_keeps_tag() {
        let artifact = ModelArtifact::new(ModelKind::DecisionTree(weather_tree()));
        let json = serde_json::to_string(&artifact).unwrap();
        assert!(json.contains(r#""type":"decision_tree""#));
        assert_eq!(ModelArtifact::from_json(&json).unwrap(), artifact);
    }
}
