//! Classifier modules
//!
//! - Model artifact loading and the [`Classifier`] trait
//! - Single-shot inference and outcome mapping

pub mod invoker;
pub mod model;

pub use invoker::{invoke, invoke_with, LabelPolicy};
pub use model::{
    Classifier, DecisionTree, LogisticRegression, ModelArtifact, ModelKind, RandomForest, TreeNode,
};
