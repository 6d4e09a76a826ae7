//! Shipment input records
//!
//! [`ShipmentInput`] is the typed record the encoder consumes. Categorical
//! attributes are vocabulary enums, so only the numeric minima remain to be
//! checked. [`RawShipmentInput`] is what a form actually delivers: every field
//! optional, categoricals as either a code or a label.

use super::vocabulary::{
    City, Holiday, ProductCategory, ShippingMethod, ShippingMode, Traffic, Vocabulary, Weather,
};
use crate::error::PredictorError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Form key of each field, in feature-vector order
pub const FIELD_KEYS: [&str; 12] = [
    "product_category",
    "product_weight",
    "shipping_method",
    "distance",
    "items_in_shipment",
    "shipping_mode",
    "origin_city",
    "destination_city",
    "weather_conditions",
    "holiday_indicator",
    "warehouse_processing_time",
    "traffic_conditions",
];

/// Smallest accepted product weight in kg (inclusive)
pub const MIN_PRODUCT_WEIGHT: f64 = 0.1;
/// Smallest accepted distance in km
pub const MIN_DISTANCE: f64 = 1.0;
/// Smallest accepted item count
pub const MIN_ITEMS: u32 = 1;
/// Smallest accepted warehouse processing time in hours
pub const MIN_PROCESSING_TIME: u32 = 1;

/// One shipment, fully typed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipmentInput {
    /// Product category
    pub product_category: ProductCategory,
    /// Product weight in kg (>= 0.1)
    pub product_weight: f64,
    /// Shipping service level
    pub shipping_method: ShippingMethod,
    /// Distance in km (>= 1)
    pub distance: f64,
    /// Number of items in the shipment (>= 1)
    pub items_in_shipment: u32,
    /// Mode of transport
    pub shipping_mode: ShippingMode,
    /// Origin city
    pub origin_city: City,
    /// Destination city
    pub destination_city: City,
    /// Weather along the route
    pub weather_conditions: Weather,
    /// Holiday flag
    pub holiday_indicator: Holiday,
    /// Warehouse processing time in hours (>= 1)
    pub warehouse_processing_time: u32,
    /// Traffic along the route
    pub traffic_conditions: Traffic,
}

impl ShipmentInput {
    /// Check the numeric fields against their minima
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` naming the first offending field, in
    /// feature-vector order.
    pub fn validate(&self) -> Result<(), PredictorError> {
        check_min_f64("product_weight", self.product_weight, MIN_PRODUCT_WEIGHT)?;
        check_min_f64("distance", self.distance, MIN_DISTANCE)?;
        check_min_u32("items_in_shipment", self.items_in_shipment, MIN_ITEMS)?;
        check_min_u32(
            "warehouse_processing_time",
            self.warehouse_processing_time,
            MIN_PROCESSING_TIME,
        )?;
        Ok(())
    }
}

fn check_min_f64(field: &'static str, value: f64, min: f64) -> Result<(), PredictorError> {
    if !value.is_finite() {
        return Err(PredictorError::invalid(
            field,
            format!("must be a finite number, got {}", value),
        ));
    }
    if value < min {
        return Err(PredictorError::invalid(
            field,
            format!("must be at least {}, got {}", min, value),
        ));
    }
    Ok(())
}

fn check_min_u32(field: &'static str, value: u32, min: u32) -> Result<(), PredictorError> {
    if value < min {
        return Err(PredictorError::invalid(
            field,
            format!("must be at least {}, got {}", min, value),
        ));
    }
    Ok(())
}

/// A categorical value as submitted: integer code or display label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawChoice {
    /// Vocabulary code (e.g. `2`)
    Code(i64),
    /// Code sent as a float (e.g. `2.0`); only whole values resolve
    Number(f64),
    /// Display label (e.g. `"Electronics"`)
    Label(String),
}

impl RawChoice {
    fn resolve<V: Vocabulary>(&self, field: &'static str) -> Result<V, PredictorError> {
        match self {
            RawChoice::Code(code) => V::decode(field, *code),
            RawChoice::Number(value) => V::decode_number(field, *value),
            RawChoice::Label(label) => V::parse(field, label),
        }
    }
}

impl From<i64> for RawChoice {
    fn from(code: i64) -> Self {
        RawChoice::Code(code)
    }
}

impl From<&str> for RawChoice {
    fn from(label: &str) -> Self {
        RawChoice::Label(label.to_string())
    }
}

/// Shipment fields exactly as a form submits them
///
/// Any field may be absent. [`RawShipmentInput::validate`] turns a complete
/// submission into a [`ShipmentInput`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawShipmentInput {
    /// Product category code or label
    pub product_category: Option<RawChoice>,
    /// Product weight in kg
    pub product_weight: Option<f64>,
    /// Shipping method code or label
    pub shipping_method: Option<RawChoice>,
    /// Distance in km
    pub distance: Option<f64>,
    /// Item count
    pub items_in_shipment: Option<f64>,
    /// Shipping mode code or label
    pub shipping_mode: Option<RawChoice>,
    /// Origin city code or label
    pub origin_city: Option<RawChoice>,
    /// Destination city code or label
    pub destination_city: Option<RawChoice>,
    /// Weather code or label
    pub weather_conditions: Option<RawChoice>,
    /// Holiday code or label
    pub holiday_indicator: Option<RawChoice>,
    /// Processing time in hours
    pub warehouse_processing_time: Option<f64>,
    /// Traffic code or label
    pub traffic_conditions: Option<RawChoice>,
}

impl RawShipmentInput {
    /// Read a JSON object submission
    ///
    /// Unlike deserializing with serde directly, a value of the wrong type is
    /// reported against its own field. Numbers may arrive as strings
    /// (`"120"`), and `null` or a blank string counts as missing.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for `"form"` if the text is not a JSON object or
    /// carries an unknown key, and for the field itself if its value has the
    /// wrong type.
    pub fn from_json(text: &str) -> Result<Self, PredictorError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| PredictorError::invalid("form", format!("malformed JSON: {}", e)))?;
        let object = value
            .as_object()
            .ok_or_else(|| PredictorError::invalid("form", "expected a JSON object"))?;

        if let Some(unknown) = object.keys().find(|k| !FIELD_KEYS.contains(&k.as_str())) {
            return Err(PredictorError::invalid(
                "form",
                format!("unknown field '{}'", unknown),
            ));
        }

        let choice_at = |field: &'static str| json_choice(field, object.get(field));
        let number_at = |field: &'static str| json_number(field, object.get(field));

        Ok(Self {
            product_category: choice_at("product_category")?,
            product_weight: number_at("product_weight")?,
            shipping_method: choice_at("shipping_method")?,
            distance: number_at("distance")?,
            items_in_shipment: number_at("items_in_shipment")?,
            shipping_mode: choice_at("shipping_mode")?,
            origin_city: choice_at("origin_city")?,
            destination_city: choice_at("destination_city")?,
            weather_conditions: choice_at("weather_conditions")?,
            holiday_indicator: choice_at("holiday_indicator")?,
            warehouse_processing_time: number_at("warehouse_processing_time")?,
            traffic_conditions: choice_at("traffic_conditions")?,
        })
    }

    /// Validate every field and build a typed [`ShipmentInput`]
    ///
    /// Fields are checked in feature-vector order and the first failure is
    /// returned; no default is ever substituted for a missing field.
    pub fn validate(&self) -> Result<ShipmentInput, PredictorError> {
        let input = ShipmentInput {
            product_category: choice(&self.product_category, "product_category")?,
            product_weight: number(self.product_weight, "product_weight", MIN_PRODUCT_WEIGHT)?,
            shipping_method: choice(&self.shipping_method, "shipping_method")?,
            distance: number(self.distance, "distance", MIN_DISTANCE)?,
            items_in_shipment: whole(self.items_in_shipment, "items_in_shipment", MIN_ITEMS)?,
            shipping_mode: choice(&self.shipping_mode, "shipping_mode")?,
            origin_city: choice(&self.origin_city, "origin_city")?,
            destination_city: choice(&self.destination_city, "destination_city")?,
            weather_conditions: choice(&self.weather_conditions, "weather_conditions")?,
            holiday_indicator: choice(&self.holiday_indicator, "holiday_indicator")?,
            warehouse_processing_time: whole(
                self.warehouse_processing_time,
                "warehouse_processing_time",
                MIN_PROCESSING_TIME,
            )?,
            traffic_conditions: choice(&self.traffic_conditions, "traffic_conditions")?,
        };
        Ok(input)
    }
}

impl From<&ShipmentInput> for RawShipmentInput {
    fn from(input: &ShipmentInput) -> Self {
        Self {
            product_category: Some(RawChoice::Code(input.product_category.code().into())),
            product_weight: Some(input.product_weight),
            shipping_method: Some(RawChoice::Code(input.shipping_method.code().into())),
            distance: Some(input.distance),
            items_in_shipment: Some(input.items_in_shipment.into()),
            shipping_mode: Some(RawChoice::Code(input.shipping_mode.code().into())),
            origin_city: Some(RawChoice::Code(input.origin_city.code().into())),
            destination_city: Some(RawChoice::Code(input.destination_city.code().into())),
            weather_conditions: Some(RawChoice::Code(input.weather_conditions.code().into())),
            holiday_indicator: Some(RawChoice::Code(input.holiday_indicator.code().into())),
            warehouse_processing_time: Some(input.warehouse_processing_time.into()),
            traffic_conditions: Some(RawChoice::Code(input.traffic_conditions.code().into())),
        }
    }
}

fn json_choice(
    field: &'static str,
    value: Option<&Value>,
) -> Result<Option<RawChoice>, PredictorError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(code) => Ok(Some(RawChoice::Code(code))),
            None => Ok(n.as_f64().map(RawChoice::Number)),
        },
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(RawChoice::Label(s.clone()))),
        Some(other) => Err(PredictorError::invalid(
            field,
            format!("expected a code or label, got {}", other),
        )),
    }
}

fn json_number(field: &'static str, value: Option<&Value>) -> Result<Option<f64>, PredictorError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| PredictorError::invalid(field, format!("'{}' is not a number", s))),
        Some(other) => Err(PredictorError::invalid(
            field,
            format!("expected a number, got {}", other),
        )),
    }
}

fn missing(field: &'static str) -> PredictorError {
    PredictorError::invalid(field, "missing value")
}

fn choice<V: Vocabulary>(raw: &Option<RawChoice>, field: &'static str) -> Result<V, PredictorError> {
    raw.as_ref().ok_or_else(|| missing(field))?.resolve(field)
}

fn number(raw: Option<f64>, field: &'static str, min: f64) -> Result<f64, PredictorError> {
    let value = raw.ok_or_else(|| missing(field))?;
    check_min_f64(field, value, min)?;
    Ok(value)
}

fn whole(raw: Option<f64>, field: &'static str, min: u32) -> Result<u32, PredictorError> {
    let value = raw.ok_or_else(|| missing(field))?;
    check_min_f64(field, value, f64::from(min))?;
    if value.fract() != 0.0 {
        return Err(PredictorError::invalid(
            field,
            format!("must be a whole number, got {}", value),
        ));
    }
    if value > f64::from(u32::MAX) {
        return Err(PredictorError::invalid(
            field,
            format!("is out of range, got {}", value),
        ));
    }
    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> RawShipmentInput {
        RawShipmentInput {
            product_category: Some(RawChoice::Code(2)),
            product_weight: Some(5.0),
            shipping_method: Some(RawChoice::Code(0)),
            distance: Some(120.0),
            items_in_shipment: Some(3.0),
            shipping_mode: Some(RawChoice::Code(1)),
            origin_city: Some(RawChoice::Code(3)),
            destination_city: Some(RawChoice::Code(2)),
            weather_conditions: Some(RawChoice::Code(0)),
            holiday_indicator: Some(RawChoice::Code(0)),
            warehouse_processing_time: Some(4.0),
            traffic_conditions: Some(RawChoice::Code(1)),
        }
    }

    #[test]
    fn test_validate_complete() {
        let input = complete().validate().unwrap();
        assert_eq!(input.product_category, ProductCategory::Electronics);
        assert_eq!(input.origin_city, City::NewYork);
        assert_eq!(input.destination_city, City::LosAngeles);
        assert_eq!(input.items_in_shipment, 3);
        assert_eq!(input.traffic_conditions, Traffic::Low);
    }

    #[test]
    fn test_labels_accepted() {
        let mut raw = complete();
        raw.product_category = Some("Electronics".into());
        raw.origin_city = Some("New York".into());
        assert_eq!(raw.validate().unwrap(), complete().validate().unwrap());
    }

    #[test]
    fn test_missing_field_named() {
        let mut raw = complete();
        raw.weather_conditions = None;
        let err = raw.validate().unwrap_err();
        assert_eq!(err.field(), Some("weather_conditions"));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_out_of_vocabulary_code() {
        let mut raw = complete();
        raw.shipping_mode = Some(RawChoice::Code(3));
        assert_eq!(raw.validate().unwrap_err().field(), Some("shipping_mode"));

        let mut raw = complete();
        raw.destination_city = Some(RawChoice::Code(-1));
        assert_eq!(raw.validate().unwrap_err().field(), Some("destination_city"));
    }

    #[test]
    fn test_numeric_minima() {
        let mut raw = complete();
        raw.product_weight = Some(0.0);
        assert_eq!(raw.validate().unwrap_err().field(), Some("product_weight"));

        let mut raw = complete();
        raw.product_weight = Some(MIN_PRODUCT_WEIGHT);
        assert!(raw.validate().is_ok());

        let mut raw = complete();
        raw.distance = Some(0.5);
        assert_eq!(raw.validate().unwrap_err().field(), Some("distance"));

        let mut raw = complete();
        raw.items_in_shipment = Some(0.0);
        assert_eq!(raw.validate().unwrap_err().field(), Some("items_in_shipment"));

        let mut raw = complete();
        raw.warehouse_processing_time = Some(-2.0);
        assert_eq!(
            raw.validate().unwrap_err().field(),
            Some("warehouse_processing_time")
        );
    }

    #[test]
    fn test_integer_fields_reject_fractions() {
        let mut raw = complete();
        raw.items_in_shipment = Some(2.5);
        let err = raw.validate().unwrap_err();
        assert_eq!(err.field(), Some("items_in_shipment"));
        assert!(err.to_string().contains("whole number"));
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut raw = complete();
        raw.distance = Some(f64::NAN);
        assert_eq!(raw.validate().unwrap_err().field(), Some("distance"));
    }

    #[test]
    fn test_json_submission() {
        let json = r#"{
            "product_category": "Electronics", "product_weight": 5.0,
            "shipping_method": 0, "distance": 120, "items_in_shipment": 3,
            "shipping_mode": "Ground", "origin_city": 3, "destination_city": "Los Angeles",
            "weather_conditions": 0, "holiday_indicator": "No",
            "warehouse_processing_time": 4, "traffic_conditions": 1
        }"#;
        let raw: RawShipmentInput = serde_json::from_str(json).unwrap();
        assert_eq!(raw.validate().unwrap(), complete().validate().unwrap());
    }

    #[test]
    fn test_json_rejects_unknown_keys() {
        let json = r#"{"product_colour": "red"}"#;
        assert!(serde_json::from_str::<RawShipmentInput>(json).is_err());
    }

    #[test]
    fn test_roundtrip_through_raw() {
        let input = complete().validate().unwrap();
        assert_eq!(RawShipmentInput::from(&input).validate().unwrap(), input);
    }

    #[test]
    fn test_float_codes() {
        let mut raw = complete();
        raw.product_category = Some(RawChoice::Number(2.0));
        assert_eq!(raw.validate().unwrap(), complete().validate().unwrap());

        let mut raw = complete();
        raw.product_category = Some(RawChoice::Number(2.5));
        let err = raw.validate().unwrap_err();
        assert_eq!(err.field(), Some("product_category"));
        assert!(err.to_string().contains("whole"));
    }

    #[test]
    fn test_serde_accepts_float_code() {
        let raw: RawShipmentInput =
            serde_json::from_str(r#"{"product_category": 2.0}"#).unwrap();
        assert_eq!(raw.product_category, Some(RawChoice::Number(2.0)));
    }

    #[test]
    fn test_from_json_matches_serde() {
        let json = r#"{
            "product_category": 2.0, "product_weight": "5",
            "shipping_method": "Express", "distance": "120", "items_in_shipment": 3,
            "shipping_mode": 1, "origin_city": "New York", "destination_city": 2,
            "weather_conditions": "0", "holiday_indicator": "No",
            "warehouse_processing_time": 4.0, "traffic_conditions": "Low"
        }"#;
        let raw = RawShipmentInput::from_json(json).unwrap();
        assert_eq!(raw.validate().unwrap(), complete().validate().unwrap());
    }

    #[test]
    fn test_from_json_names_field_on_type_error() {
        let err = RawShipmentInput::from_json(r#"{"product_category": 2.5}"#)
            .unwrap()
            .validate()
            .unwrap_err();
        assert_eq!(err.field(), Some("product_category"));

        let err = RawShipmentInput::from_json(r#"{"distance": "far"}"#).unwrap_err();
        assert_eq!(err.field(), Some("distance"));

        let err = RawShipmentInput::from_json(r#"{"origin_city": [3]}"#).unwrap_err();
        assert_eq!(err.field(), Some("origin_city"));

        let err = RawShipmentInput::from_json(r#"{"distance": true}"#).unwrap_err();
        assert_eq!(err.field(), Some("distance"));
    }

    #[test]
    fn test_from_json_form_errors() {
        let err = RawShipmentInput::from_json("{\"distance\": 12").unwrap_err();
        assert_eq!(err.field(), Some("form"));

        let err = RawShipmentInput::from_json("[1, 2]").unwrap_err();
        assert_eq!(err.field(), Some("form"));

        let err = RawShipmentInput::from_json(r#"{"product_colour": "red"}"#).unwrap_err();
        assert_eq!(err.field(), Some("form"));
        assert!(err.to_string().contains("product_colour"));
    }

    #[test]
    fn test_from_json_blank_is_missing() {
        let raw = RawShipmentInput::from_json(r#"{"distance": "", "origin_city": null}"#).unwrap();
        assert_eq!(raw.distance, None);
        assert_eq!(raw.origin_city, None);
        let err = raw.validate().unwrap_err();
        assert_eq!(err.field(), Some("product_category"));
    }
}
