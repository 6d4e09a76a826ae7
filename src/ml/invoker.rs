//! Inference invocation
//!
//! Submits one feature vector to the classifier and maps its first output
//! element onto an [`Outcome`].

use super::model::Classifier;
use crate::error::PredictorError;
use crate::features::encoder::FeatureVector;
use crate::prediction::result::{Outcome, PredictionMetadata, PredictionResult};
use std::time::Instant;

/// How labels outside {0, 1} are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelPolicy {
    /// Anything other than 1 means no delay (default)
    #[default]
    Lenient,
    /// Labels other than 0 and 1 are an inference error
    Strict,
}

/// Run the classifier on one feature vector
///
/// Equivalent to [`invoke_with`] under [`LabelPolicy::Lenient`].
///
/// # Errors
///
/// Returns `InferenceError` if the classifier width does not match, the
/// classifier fails, or its output is empty. Any first element other than 1,
/// NaN included, reads as no delay.
pub fn invoke(
    classifier: &dyn Classifier,
    features: &FeatureVector,
) -> Result<PredictionResult, PredictorError> {
    invoke_with(classifier, features, LabelPolicy::Lenient)
}

/// Run the classifier on one feature vector under an explicit label policy
///
/// The call is made exactly once. There is no retry and no timeout.
pub fn invoke_with(
    classifier: &dyn Classifier,
    features: &FeatureVector,
    policy: LabelPolicy,
) -> Result<PredictionResult, PredictorError> {
    let start_time = Instant::now();
    let sample = features.as_slice();

    log::debug!(
        "Invoking {} on {} features",
        classifier.name(),
        sample.len()
    );

    if classifier.n_features() != sample.len() {
        return Err(PredictorError::InferenceError(format!(
            "shape mismatch: classifier expects {} features, got {}",
            classifier.n_features(),
            sample.len()
        )));
    }

    let output = classifier.predict(sample).map_err(|e| match e {
        PredictorError::InferenceError(_) => e,
        other => PredictorError::InferenceError(other.to_string()),
    })?;

    let raw = *output.first().ok_or_else(|| {
        PredictorError::InferenceError("classifier returned no output".to_string())
    })?;

    // NaN fails both comparisons, so it takes the unexpected-label path too
    if raw != 0.0 && raw != 1.0 {
        match policy {
            LabelPolicy::Strict => {
                return Err(PredictorError::InferenceError(format!(
                    "classifier returned label {}, expected 0 or 1",
                    raw
                )));
            }
            LabelPolicy::Lenient => {
                log::warn!("Classifier returned label {}, reading it as no delay", raw);
            }
        }
    }

    let outcome = Outcome::from_label(raw);
    let processing_time_ms = start_time.elapsed().as_secs_f32() * 1000.0;

    log::debug!("Classifier output {} -> {:?}", raw, outcome);

    Ok(PredictionResult {
        label: outcome.label(),
        outcome,
        message: outcome.advisory().to_string(),
        features: *features,
        metadata: PredictionMetadata {
            model: classifier.name().to_string(),
            raw_output: raw,
            processing_time_ms,
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
        },
    })
}
