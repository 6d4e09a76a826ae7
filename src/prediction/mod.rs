//! Prediction result modules
//!
//! - Outcome mapping and result types
//! - Per-request state machine

pub mod result;
pub mod state;

pub use result::{Outcome, PredictionMetadata, PredictionResult};
pub use state::PredictionState;
