//! Per-request prediction state
//!
//! Every submission moves from [`PredictionState::AwaitingInput`] to exactly
//! one terminal state. Nothing carries over to the next request.

use super::result::PredictionResult;
use crate::error::PredictorError;

/// Lifecycle of a single prediction request
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PredictionState {
    /// Form shown, nothing submitted yet
    #[default]
    AwaitingInput,
    /// Classifier produced a verdict
    PredictionReady(PredictionResult),
    /// Input was rejected or inference failed
    PredictionFailed(PredictorError),
}

impl PredictionState {
    /// Fold a request outcome into its terminal state
    pub fn from_result(result: Result<PredictionResult, PredictorError>) -> Self {
        match result {
            Ok(r) => PredictionState::PredictionReady(r),
            Err(e) => PredictionState::PredictionFailed(e),
        }
    }

    /// True once a verdict or failure has been recorded
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PredictionState::AwaitingInput)
    }

    /// Verdict, if the request succeeded
    pub fn result(&self) -> Option<&PredictionResult> {
        match self {
            PredictionState::PredictionReady(r) => Some(r),
            _ => None,
        }
    }

    /// Failure, if the request failed
    pub fn error(&self) -> Option<&PredictorError> {
        match self {
            PredictionState::PredictionFailed(e) => Some(e),
            _ => None,
        }
    }
}
