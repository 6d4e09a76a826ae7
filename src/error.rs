//! Error types for shipment encoding and delay prediction

use std::fmt;

/// Errors that can occur while loading the model or serving a prediction
#[derive(Debug, Clone, PartialEq)]
pub enum PredictorError {
    /// Model artifact missing, unreadable or structurally invalid.
    ///
    /// Fatal: a predictor that fails to start serves no requests.
    StartupError(String),

    /// A shipment field is missing, outside its vocabulary or below its minimum
    InvalidInput {
        /// Form key of the offending field (e.g. `product_weight`)
        field: &'static str,
        /// Human-readable reason
        reason: String,
    },

    /// The classifier failed or produced output that cannot be interpreted
    InferenceError(String),
}

impl PredictorError {
    /// Shorthand for an [`PredictorError::InvalidInput`] on `field`
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        PredictorError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Field named by an `InvalidInput` error, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            PredictorError::InvalidInput { field, .. } => Some(field),
            _ => None,
        }
    }

    /// True for errors that end the process rather than a single request
    pub fn is_fatal(&self) -> bool {
        matches!(self, PredictorError::StartupError(_))
    }
}

impl fmt::Display for PredictorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictorError::StartupError(msg) => write!(f, "Startup error: {}", msg),
            PredictorError::InvalidInput { field, reason } => {
                write!(f, "Invalid input for '{}': {}", field, reason)
            }
            PredictorError::InferenceError(msg) => write!(f, "Prediction error: {}", msg),
        }
    }
}

impl std::error::Error for PredictorError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_field() {
        let err = PredictorError::invalid("product_weight", "must be at least 0.1, got 0");
        assert_eq!(
            err.to_string(),
            "Invalid input for 'product_weight': must be at least 0.1, got 0"
        );
        assert_eq!(err.field(), Some("product_weight"));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_startup_is_fatal() {
        let err = PredictorError::StartupError("model file not found".to_string());
        assert!(err.is_fatal());
        assert_eq!(err.field(), None);
    }
}
