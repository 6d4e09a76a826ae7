//! Feature encoding
//!
//! Maps a [`ShipmentInput`] to the twelve-number vector the classifier was
//! trained on. The column order is part of the model contract:
//!
//! | # | Column | Encoding |
//! |---|---|---|
//! | 0 | product category | vocabulary code |
//! | 1 | product weight | kg, as entered |
//! | 2 | shipping method | vocabulary code |
//! | 3 | distance | km, as entered |
//! | 4 | items in shipment | count |
//! | 5 | shipping mode | vocabulary code |
//! | 6 | origin city | vocabulary code |
//! | 7 | destination city | vocabulary code |
//! | 8 | weather conditions | vocabulary code |
//! | 9 | holiday indicator | 0 / 1 |
//! | 10 | warehouse processing time | hours |
//! | 11 | traffic conditions | vocabulary code |
//!
//! # Example
//!
//! ```
//! use shipping_delay::features::encoder::encode;
//! use shipping_delay::features::input::ShipmentInput;
//! use shipping_delay::features::vocabulary::*;
//!
//! let input = ShipmentInput {
//!     product_category: ProductCategory::Electronics,
//!     product_weight: 5.0,
//!     shipping_method: ShippingMethod::Express,
//!     distance: 120.0,
//!     items_in_shipment: 3,
//!     shipping_mode: ShippingMode::Ground,
//!     origin_city: City::NewYork,
//!     destination_city: City::LosAngeles,
//!     weather_conditions: Weather::Clear,
//!     holiday_indicator: Holiday::No,
//!     warehouse_processing_time: 4,
//!     traffic_conditions: Traffic::Low,
//! };
//!
//! let features = encode(&input)?;
//! assert_eq!(
//!     features.as_slice(),
//!     &[2.0, 5.0, 0.0, 120.0, 3.0, 1.0, 3.0, 2.0, 0.0, 0.0, 4.0, 1.0]
//! );
//! # Ok::<(), shipping_delay::PredictorError>(())
//! ```

use super::input::{ShipmentInput, FIELD_KEYS};
use super::vocabulary::Vocabulary;
use crate::error::PredictorError;
use serde::{Deserialize, Serialize};

/// Number of columns the classifier expects
pub const FEATURE_COUNT: usize = 12;

/// Ordered feature vector for one shipment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Build a vector from raw columns, rejecting non-finite entries
    pub fn new(values: [f64; FEATURE_COUNT]) -> Result<Self, PredictorError> {
        for (key, value) in FIELD_KEYS.iter().zip(values.iter()) {
            if !value.is_finite() {
                return Err(PredictorError::invalid(
                    *key,
                    format!("encodes to a non-finite value ({})", value),
                ));
            }
        }
        Ok(Self(values))
    }

    /// Columns in model order
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Column for form key `key`, if it names a feature
    pub fn get(&self, key: &str) -> Option<f64> {
        FIELD_KEYS
            .iter()
            .position(|k| *k == key)
            .map(|idx| self.0[idx])
    }

    /// `(form key, value)` pairs in model order
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FIELD_KEYS.iter().copied().zip(self.0.iter().copied())
    }
}

impl AsRef<[f64]> for FeatureVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// Encode a shipment into its feature vector
///
/// Categorical fields become their vocabulary code; numeric fields pass
/// through unchanged.
///
/// # Errors
///
/// Returns `InvalidInput` naming the field when a numeric value is below its
/// minimum or not finite. Nothing is clamped.
pub fn encode(input: &ShipmentInput) -> Result<FeatureVector, PredictorError> {
    log::debug!("Encoding shipment: {:?}", input);

    if let Err(e) = input.validate() {
        log::warn!("Rejected shipment input: {}", e);
        return Err(e);
    }

    FeatureVector::new([
        f64::from(input.product_category.code()),
        input.product_weight,
        f64::from(input.shipping_method.code()),
        input.distance,
        f64::from(input.items_in_shipment),
        f64::from(input.shipping_mode.code()),
        f64::from(input.origin_city.code()),
        f64::from(input.destination_city.code()),
        f64::from(input.weather_conditions.code()),
        f64::from(input.holiday_indicator.code()),
        f64::from(input.warehouse_processing_time),
        f64::from(input.traffic_conditions.code()),
    ])
}
