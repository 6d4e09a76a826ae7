//! Feature encoding modules
//!
//! Turns the twelve shipment attributes collected by the form into the
//! numeric vector the classifier was trained on:
//! - Categorical vocabularies with pinned integer codes
//! - Raw and typed shipment records
//! - Ordered feature-vector encoding

pub mod encoder;
pub mod input;
pub mod vocabulary;

pub use encoder::{encode, FeatureVector, FEATURE_COUNT};
pub use input::{RawChoice, RawShipmentInput, ShipmentInput, FIELD_KEYS};
pub use vocabulary::{
    City, Holiday, ProductCategory, ShippingMethod, ShippingMode, Traffic, Vocabulary, Weather,
};
