//! Configuration parameters for the delay predictor

use std::path::PathBuf;

/// Default location of the serialized classifier
pub const DEFAULT_MODEL_PATH: &str = "predictshipping.json";

/// Predictor configuration parameters
#[derive(Debug, Clone)]
pub struct PredictorConfig {
    /// Path of the model artifact loaded at startup (default: `predictshipping.json`)
    pub model_path: PathBuf,

    /// Reject labels other than 0 and 1 (default: false)
    ///
    /// When false, any label other than 1 is read as "no delay", which is how
    /// the deployed model has always been interpreted.
    pub strict_labels: bool,

    /// Pause before submitting, in milliseconds (default: 0)
    ///
    /// Only the interactive form honours this; the library never sleeps.
    pub submit_delay_ms: u64,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            strict_labels: false,
            submit_delay_ms: 0,
        }
    }
}

impl PredictorConfig {
    /// Default configuration reading the model from `path`
    pub fn with_model_path(path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: path.into(),
            ..Self::default()
        }
    }
}
