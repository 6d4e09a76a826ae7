//! Prediction result types

use crate::features::encoder::FeatureVector;
use serde::{Deserialize, Serialize};

/// The two verdicts a prediction can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Classifier label 1
    Delay,
    /// Any other label
    NoDelay,
}

impl Outcome {
    /// Map a raw classifier label to an outcome
    ///
    /// Only an exact 1 means delay. Every other value, including labels the
    /// model was never trained to emit, reads as no delay.
    ///
    /// # Example
    ///
    /// ```
    /// use shipping_delay::prediction::result::Outcome;
    ///
    /// assert_eq!(Outcome::from_label(1.0), Outcome::Delay);
    /// assert_eq!(Outcome::from_label(0.0), Outcome::NoDelay);
    /// assert_eq!(Outcome::from_label(2.0), Outcome::NoDelay);
    /// ```
    pub fn from_label(label: f64) -> Self {
        if label == 1.0 {
            Outcome::Delay
        } else {
            Outcome::NoDelay
        }
    }

    /// Binary label (1 = delay, 0 = no delay)
    pub fn label(self) -> u8 {
        match self {
            Outcome::Delay => 1,
            Outcome::NoDelay => 0,
        }
    }

    /// Verdict headline
    pub fn headline(self) -> &'static str {
        match self {
            Outcome::Delay => "Delay predicted",
            Outcome::NoDelay => "No delay predicted",
        }
    }

    /// Advice shown under the headline
    pub fn advisory(self) -> &'static str {
        match self {
            Outcome::Delay => "Consider notifying customers and adjusting delivery schedules.",
            Outcome::NoDelay => "Shipping is expected to be on time.",
        }
    }
}

/// Metadata about how a prediction was produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionMetadata {
    /// Model family reported by the classifier
    pub model: String,

    /// Raw first output element returned by the classifier
    pub raw_output: f64,

    /// Encode + inference time in milliseconds
    pub processing_time_ms: f32,

    /// Crate version that produced the result
    pub algorithm_version: String,
}

/// Complete result of one prediction request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Binary label (1 = delay, 0 = no delay)
    pub label: u8,

    /// Verdict
    pub outcome: Outcome,

    /// Advisory text for the verdict
    pub message: String,

    /// Feature vector submitted to the classifier
    pub features: FeatureVector,

    /// Prediction metadata
    pub metadata: PredictionMetadata,
}

impl PredictionResult {
    /// True when a delay was predicted
    pub fn is_delayed(&self) -> bool {
        self.outcome == Outcome::Delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_mapping() {
        assert_eq!(Outcome::from_label(1.0), Outcome::Delay);
        assert_eq!(Outcome::from_label(0.0), Outcome::NoDelay);
        assert_eq!(Outcome::from_label(-1.0), Outcome::NoDelay);
        assert_eq!(Outcome::from_label(0.999), Outcome::NoDelay);
        assert_eq!(Outcome::from_label(f64::NAN), Outcome::NoDelay);
    }

    #[test]
    fn test_outcome_text() {
        assert_eq!(Outcome::Delay.headline(), "Delay predicted");
        assert_eq!(Outcome::NoDelay.headline(), "No delay predicted");
        assert!(Outcome::Delay.advisory().contains("notifying customers"));
        assert!(Outcome::NoDelay.advisory().contains("on time"));
        assert_eq!(Outcome::Delay.label(), 1);
        assert_eq!(Outcome::NoDelay.label(), 0);
    }
}
