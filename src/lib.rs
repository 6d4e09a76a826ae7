//! # Shipping Delay
//!
//! Feature encoding and delay classification for shipment delivery forecasts.
//! Twelve shipment attributes collected from a form are encoded into the
//! numeric vector a pre-trained classifier expects, and the classifier's label
//! is turned into a "delay / no delay" verdict with advisory text.
//!
//! ## Features
//!
//! - **Feature Encoding**: Explicit vocabularies with pinned integer codes and
//!   validated numeric minima
//! - **Model Artifacts**: Logistic regression, decision tree and random forest
//!   classifiers loaded from JSON once at startup
//! - **Inference**: Single-shot prediction with a fixed label-to-outcome mapping
//! - **Form Surface**: Field descriptors, `key=value` parsing and verdict rendering
//!
//! ## Quick Start
//!
//! ```no_run
//! use shipping_delay::{Predictor, PredictorConfig, RawShipmentInput};
//!
//! // Fails with StartupError if predictshipping.json is missing
//! let predictor = Predictor::load(PredictorConfig::default())?;
//!
//! let raw: RawShipmentInput = serde_json::from_str(r#"{
//!     "product_category": "Electronics", "product_weight": 5.0,
//!     "shipping_method": "Express", "distance": 120, "items_in_shipment": 3,
//!     "shipping_mode": "Ground", "origin_city": "New York",
//!     "destination_city": "Los Angeles", "weather_conditions": "Clear",
//!     "holiday_indicator": "No", "warehouse_processing_time": 4,
//!     "traffic_conditions": "Low"
//! }"#).unwrap();
//!
//! let result = predictor.predict_raw(&raw)?;
//! println!("{}: {}", result.outcome.headline(), result.message);
//! # Ok::<(), shipping_delay::PredictorError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Form Input → Validation → Feature Encoding → Classifier → Outcome
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod features;
pub mod form;
pub mod ml;
pub mod prediction;
pub mod predictor;

// Re-export main types
pub use config::PredictorConfig;
pub use error::PredictorError;
pub use features::{FeatureVector, RawChoice, RawShipmentInput, ShipmentInput};
pub use ml::{Classifier, LabelPolicy, ModelArtifact};
pub use prediction::{Outcome, PredictionResult, PredictionState};
pub use predictor::Predictor;

/// Main prediction function
///
/// Encodes a shipment and classifies it, reading any label other than 1 as
/// "no delay".
///
/// # Arguments
///
/// * `input` - Typed shipment attributes
/// * `classifier` - Loaded classifier (twelve input columns)
///
/// # Returns
///
/// `PredictionResult` with the binary label, outcome, advisory text, the
/// submitted feature vector and timing metadata
///
/// # Errors
///
/// Returns `InvalidInput` if a numeric field is below its minimum (the
/// classifier is not called), or `InferenceError` if the classifier fails.
///
/// # Example
///
/// ```
/// use shipping_delay::features::vocabulary::*;
/// use shipping_delay::ml::model::{ModelArtifact, ModelKind};
/// use shipping_delay::{predict_delay, Outcome, ShipmentInput};
///
/// let model = ModelArtifact::new(ModelKind::Constant { label: 1.0 });
/// let input = ShipmentInput {
///     product_category: ProductCategory::Electronics,
///     product_weight: 5.0,
///     shipping_method: ShippingMethod::Express,
///     distance: 120.0,
///     items_in_shipment: 3,
///     shipping_mode: ShippingMode::Ground,
///     origin_city: City::NewYork,
///     destination_city: City::LosAngeles,
///     weather_conditions: Weather::Clear,
///     holiday_indicator: Holiday::No,
///     warehouse_processing_time: 4,
///     traffic_conditions: Traffic::Low,
/// };
///
/// let result = predict_delay(&input, &model)?;
/// assert_eq!(result.outcome, Outcome::Delay);
/// # Ok::<(), shipping_delay::PredictorError>(())
/// ```
pub fn predict_delay(
    input: &ShipmentInput,
    classifier: &dyn Classifier,
) -> Result<PredictionResult, PredictorError> {
    predict_delay_with(input, classifier, LabelPolicy::Lenient)
}

/// [`predict_delay`] with an explicit policy for labels outside {0, 1}
pub fn predict_delay_with(
    input: &ShipmentInput,
    classifier: &dyn Classifier,
    policy: LabelPolicy,
) -> Result<PredictionResult, PredictorError> {
    use std::time::Instant;
    let start_time = Instant::now();

    log::debug!("Starting delay prediction with {}", classifier.name());

    let features = features::encode(input)?;
    let mut result = ml::invoke_with(classifier, &features, policy)?;

    result.metadata.processing_time_ms = start_time.elapsed().as_secs_f32() * 1000.0;

    log::debug!(
        "Prediction finished: {} in {:.3} ms",
        result.outcome.headline(),
        result.metadata.processing_time_ms
    );

    Ok(result)
}
