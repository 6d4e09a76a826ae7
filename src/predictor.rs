//! Process-wide predictor
//!
//! A [`Predictor`] owns the classifier loaded at startup. It is created once,
//! never mutated, and can be cloned cheaply to hand the same model to every
//! request handler.

use crate::config::PredictorConfig;
use crate::error::PredictorError;
use crate::features::input::{RawShipmentInput, ShipmentInput};
use crate::ml::invoker::LabelPolicy;
use crate::ml::model::{Classifier, ModelArtifact};
use crate::prediction::result::PredictionResult;
use crate::prediction::state::PredictionState;
use std::sync::Arc;

/// Loaded model plus the settings it is served with
#[derive(Debug, Clone)]
pub struct Predictor {
    classifier: Arc<dyn Classifier>,
    config: PredictorConfig,
}

impl Predictor {
    /// Load the model artifact named by `config.model_path`
    ///
    /// # Errors
    ///
    /// Returns `StartupError` if the artifact is missing or invalid. Callers
    /// must not serve predictions in that case.
    pub fn load(config: PredictorConfig) -> Result<Self, PredictorError> {
        let artifact = match ModelArtifact::load(&config.model_path) {
            Ok(a) => a,
            Err(e) => {
                log::error!("Model failed to load: {}", e);
                return Err(e);
            }
        };
        log::info!(
            "Loaded {} model from {}",
            artifact.name(),
            config.model_path.display()
        );
        Ok(Self::with_classifier(Arc::new(artifact), config))
    }

    /// Serve an already-constructed classifier
    pub fn with_classifier(classifier: Arc<dyn Classifier>, config: PredictorConfig) -> Self {
        Self { classifier, config }
    }

    /// Configuration this predictor was started with
    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    /// The shared classifier
    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    fn policy(&self) -> LabelPolicy {
        if self.config.strict_labels {
            LabelPolicy::Strict
        } else {
            LabelPolicy::Lenient
        }
    }

    /// Encode a typed shipment and classify it
    pub fn predict(&self, input: &ShipmentInput) -> Result<PredictionResult, PredictorError> {
        crate::predict_delay_with(input, self.classifier(), self.policy())
    }

    /// Validate a raw form submission, then classify it
    pub fn predict_raw(&self, raw: &RawShipmentInput) -> Result<PredictionResult, PredictorError> {
        let input = raw.validate().map_err(|e| {
            log::warn!("Rejected submission: {}", e);
            e
        })?;
        self.predict(&input)
    }

    /// Handle one submit action, always ending in a terminal state
    pub fn submit(&self, raw: &RawShipmentInput) -> PredictionState {
        PredictionState::from_result(self.predict_raw(raw))
    }
}
