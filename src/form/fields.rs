//! Form field descriptors and submission parsing
//!
//! The form shows twelve controls in feature-vector order. Submissions arrive
//! as `key=value` pairs where categorical values may be either the code or the
//! display label.

use crate::error::PredictorError;
use crate::features::input::{
    RawChoice, RawShipmentInput, FIELD_KEYS, MIN_DISTANCE, MIN_ITEMS, MIN_PROCESSING_TIME,
    MIN_PRODUCT_WEIGHT,
};
use crate::features::vocabulary::{
    City, Holiday, ProductCategory, ShippingMethod, ShippingMode, Traffic, Vocabulary, Weather,
};

/// Kind of input control
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Drop-down list; options in code order
    Select(Vec<&'static str>),
    /// Radio buttons; options in code order
    Radio(Vec<&'static str>),
    /// Numeric entry
    Number {
        /// Smallest accepted value
        min: f64,
        /// Whole numbers only
        integer: bool,
        /// Unit shown next to the control
        unit: &'static str,
    },
}

/// One control of the prediction form
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    /// Submission key
    pub key: &'static str,
    /// Human-facing label
    pub label: &'static str,
    /// Control kind
    pub kind: FieldKind,
}

impl FormField {
    /// Option labels for select and radio controls
    pub fn options(&self) -> Option<&[&'static str]> {
        match &self.kind {
            FieldKind::Select(o) | FieldKind::Radio(o) => Some(o.as_slice()),
            FieldKind::Number { .. } => None,
        }
    }
}

fn labels<V: Vocabulary>() -> Vec<&'static str> {
    V::TABLE.iter().map(|(_, label)| *label).collect()
}

fn select<V: Vocabulary>(key: &'static str, label: &'static str) -> FormField {
    FormField {
        key,
        label,
        kind: FieldKind::Select(labels::<V>()),
    }
}

fn number(
    key: &'static str,
    label: &'static str,
    min: f64,
    integer: bool,
    unit: &'static str,
) -> FormField {
    FormField {
        key,
        label,
        kind: FieldKind::Number { min, integer, unit },
    }
}

/// The twelve form controls, in feature-vector order
pub fn form_fields() -> Vec<FormField> {
    vec![
        select::<ProductCategory>("product_category", "Product Category"),
        number("product_weight", "Product Weight", MIN_PRODUCT_WEIGHT, false, "kg"),
        select::<ShippingMethod>("shipping_method", "Shipping Method"),
        number("distance", "Distance", MIN_DISTANCE, false, "km"),
        number("items_in_shipment", "Items in Shipment", f64::from(MIN_ITEMS), true, "items"),
        select::<ShippingMode>("shipping_mode", "Mode of Shipping"),
        select::<City>("origin_city", "Origin City"),
        select::<City>("destination_city", "Destination City"),
        select::<Weather>("weather_conditions", "Weather Conditions"),
        FormField {
            key: "holiday_indicator",
            label: "Is it a Holiday?",
            kind: FieldKind::Radio(labels::<Holiday>()),
        },
        number(
            "warehouse_processing_time",
            "Warehouse Processing Time",
            f64::from(MIN_PROCESSING_TIME),
            true,
            "hrs",
        ),
        select::<Traffic>("traffic_conditions", "Traffic Conditions"),
    ]
}

fn slot<'a>(raw: &'a mut RawShipmentInput, key: &str) -> Option<Slot<'a>> {
    Some(match key {
        "product_category" => Slot::Choice(&mut raw.product_category),
        "product_weight" => Slot::Number(&mut raw.product_weight),
        "shipping_method" => Slot::Choice(&mut raw.shipping_method),
        "distance" => Slot::Number(&mut raw.distance),
        "items_in_shipment" => Slot::Number(&mut raw.items_in_shipment),
        "shipping_mode" => Slot::Choice(&mut raw.shipping_mode),
        "origin_city" => Slot::Choice(&mut raw.origin_city),
        "destination_city" => Slot::Choice(&mut raw.destination_city),
        "weather_conditions" => Slot::Choice(&mut raw.weather_conditions),
        "holiday_indicator" => Slot::Choice(&mut raw.holiday_indicator),
        "warehouse_processing_time" => Slot::Number(&mut raw.warehouse_processing_time),
        "traffic_conditions" => Slot::Choice(&mut raw.traffic_conditions),
        _ => return None,
    })
}

enum Slot<'a> {
    Choice(&'a mut Option<RawChoice>),
    Number(&'a mut Option<f64>),
}

/// Build a raw submission from `key=value` pairs
///
/// Keys are trimmed; empty values count as missing and are left for
/// validation to report.
///
/// # Errors
///
/// Returns `InvalidInput` for an unknown key, a key given twice, or a numeric
/// field whose value is not a number.
pub fn parse_form<I, K, V>(pairs: I) -> Result<RawShipmentInput, PredictorError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut raw = RawShipmentInput::default();
    for (key, value) in pairs {
        let key = key.as_ref().trim();
        let value = value.as_ref().trim();

        let field = FIELD_KEYS
            .iter()
            .copied()
            .find(|k| *k == key)
            .ok_or_else(|| PredictorError::invalid("form", format!("unknown field '{}'", key)))?;

        let duplicate = match slot(&mut raw, field) {
            Some(Slot::Choice(target)) => {
                let seen = target.is_some();
                if !value.is_empty() {
                    *target = Some(RawChoice::Label(value.to_string()));
                }
                seen
            }
            Some(Slot::Number(target)) => {
                let seen = target.is_some();
                if !value.is_empty() {
                    let parsed = value.parse::<f64>().map_err(|_| {
                        PredictorError::invalid(field, format!("'{}' is not a number", value))
                    })?;
                    *target = Some(parsed);
                }
                seen
            }
            None => false,
        };
        if duplicate {
            return Err(PredictorError::invalid(field, "given more than once"));
        }
    }
    Ok(raw)
}

/// Parse a `key=value` per line submission
///
/// Blank lines and lines starting with `#` are ignored.
pub fn parse_form_text(text: &str) -> Result<RawShipmentInput, PredictorError> {
    let mut pairs = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (key, value) = line.split_once('=').ok_or_else(|| {
            PredictorError::invalid("form", format!("expected key=value, got '{}'", line))
        })?;
        pairs.push((key, value));
    }
    parse_form(pairs)
}
