//! Categorical vocabularies
//!
//! Each categorical shipment attribute is an explicit enum with a fixed integer
//! code. The codes are the ones the classifier saw at training time, which were
//! assigned by sorting the labels alphabetically. Reordering a table here
//! silently corrupts every prediction, so the tables are pinned by tests.
//!
//! | Vocabulary | Codes |
//! |---|---|
//! | [`ProductCategory`] | 0 Books, 1 Clothing, 2 Electronics, 3 Furniture, 4 Toys |
//! | [`ShippingMethod`] | 0 Express, 1 Overnight, 2 Standard |
//! | [`ShippingMode`] | 0 Air, 1 Ground, 2 Sea |
//! | [`City`] | 0 Chicago, 1 Houston, 2 Los Angeles, 3 New York, 4 San Francisco |
//! | [`Weather`] | 0 Clear, 1 Fog, 2 Rain, 3 Snow, 4 Storm |
//! | [`Holiday`] | 0 No, 1 Yes |
//! | [`Traffic`] | 0 High, 1 Low, 2 Moderate |

use crate::error::PredictorError;
use serde::{Deserialize, Serialize};

/// A closed categorical vocabulary with stable integer codes
pub trait Vocabulary: Sized + Copy + PartialEq + 'static {
    /// Vocabulary name, used in error messages
    const NAME: &'static str;

    /// Every member with its display label, in code order
    const TABLE: &'static [(Self, &'static str)];

    /// Integer code fed to the classifier
    fn code(self) -> u8;

    /// Display label
    fn label(self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(member, _)| *member == self)
            .map(|(_, label)| *label)
            .unwrap_or("")
    }

    /// Member for an integer code, `None` if the code is outside the vocabulary
    fn from_code(code: i64) -> Option<Self> {
        Self::TABLE
            .iter()
            .map(|(member, _)| *member)
            .find(|member| i64::from(member.code()) == code)
    }

    /// Member for a display label (case-insensitive, surrounding whitespace ignored)
    fn from_label(label: &str) -> Option<Self> {
        let wanted = label.trim();
        Self::TABLE
            .iter()
            .find(|(_, l)| l.eq_ignore_ascii_case(wanted))
            .map(|(member, _)| *member)
    }

    /// Decode a code for form field `field`, failing with `InvalidInput`
    fn decode(field: &'static str, code: i64) -> Result<Self, PredictorError> {
        Self::from_code(code).ok_or_else(|| {
            PredictorError::invalid(
                field,
                format!(
                    "{} is not a valid {} code (expected 0..={})",
                    code,
                    Self::NAME,
                    Self::TABLE.len() - 1
                ),
            )
        })
    }

    /// Decode a code that arrived as a float; `2.0` is code 2, `2.5` is an error
    fn decode_number(field: &'static str, value: f64) -> Result<Self, PredictorError> {
        if !value.is_finite() || value.fract() != 0.0 || value.abs() > i64::MAX as f64 {
            return Err(PredictorError::invalid(
                field,
                format!("{} is not a whole {} code", value, Self::NAME),
            ));
        }
        Self::decode(field, value as i64)
    }

    /// Parse a raw form value given either as a code (`"2"`, `"2.0"`) or a label (`"Electronics"`)
    fn parse(field: &'static str, raw: &str) -> Result<Self, PredictorError> {
        let trimmed = raw.trim();
        if let Ok(code) = trimmed.parse::<i64>() {
            return Self::decode(field, code);
        }
        if let Some(value) = numeric(trimmed) {
            return Self::decode_number(field, value);
        }
        Self::from_label(trimmed).ok_or_else(|| {
            let labels: Vec<&str> = Self::TABLE.iter().map(|(_, l)| *l).collect();
            PredictorError::invalid(
                field,
                format!(
                    "'{}' is not a {} (expected one of: {})",
                    trimmed,
                    Self::NAME,
                    labels.join(", ")
                ),
            )
        })
    }
}

/// Float reading of a form value, ignoring words like `inf` that `f64` also accepts
fn numeric(raw: &str) -> Option<f64> {
    if !raw.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '+' || c == '.') {
        return None;
    }
    raw.parse::<f64>().ok()
}

/// Product category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductCategory {
    /// Books
    Books = 0,
    /// Clothing
    Clothing = 1,
    /// Electronics
    Electronics = 2,
    /// Furniture
    Furniture = 3,
    /// Toys
    Toys = 4,
}

impl Vocabulary for ProductCategory {
    const NAME: &'static str = "product category";
    const TABLE: &'static [(Self, &'static str)] = &[
        (ProductCategory::Books, "Books"),
        (ProductCategory::Clothing, "Clothing"),
        (ProductCategory::Electronics, "Electronics"),
        (ProductCategory::Furniture, "Furniture"),
        (ProductCategory::Toys, "Toys"),
    ];

    fn code(self) -> u8 {
        self as u8
    }
}

/// Shipping service level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShippingMethod {
    /// Express
    Express = 0,
    /// Overnight
    Overnight = 1,
    /// Standard
    Standard = 2,
}

impl Vocabulary for ShippingMethod {
    const NAME: &'static str = "shipping method";
    const TABLE: &'static [(Self, &'static str)] = &[
        (ShippingMethod::Express, "Express"),
        (ShippingMethod::Overnight, "Overnight"),
        (ShippingMethod::Standard, "Standard"),
    ];

    fn code(self) -> u8 {
        self as u8
    }
}

/// Mode of transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShippingMode {
    /// Air freight
    Air = 0,
    /// Road / rail
    Ground = 1,
    /// Ocean freight
    Sea = 2,
}

impl Vocabulary for ShippingMode {
    const NAME: &'static str = "shipping mode";
    const TABLE: &'static [(Self, &'static str)] = &[
        (ShippingMode::Air, "Air"),
        (ShippingMode::Ground, "Ground"),
        (ShippingMode::Sea, "Sea"),
    ];

    fn code(self) -> u8 {
        self as u8
    }
}

/// Origin or destination city
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum City {
    /// Chicago
    Chicago = 0,
    /// Houston
    Houston = 1,
    /// Los Angeles
    LosAngeles = 2,
    /// New York
    NewYork = 3,
    /// San Francisco
    SanFrancisco = 4,
}

impl Vocabulary for City {
    const NAME: &'static str = "city";
    const TABLE: &'static [(Self, &'static str)] = &[
        (City::Chicago, "Chicago"),
        (City::Houston, "Houston"),
        (City::LosAngeles, "Los Angeles"),
        (City::NewYork, "New York"),
        (City::SanFrancisco, "San Francisco"),
    ];

    fn code(self) -> u8 {
        self as u8
    }
}

/// Weather along the route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weather {
    /// Clear
    Clear = 0,
    /// Fog
    Fog = 1,
    /// Rain
    Rain = 2,
    /// Snow
    Snow = 3,
    /// Storm
    Storm = 4,
}

impl Vocabulary for Weather {
    const NAME: &'static str = "weather condition";
    const TABLE: &'static [(Self, &'static str)] = &[
        (Weather::Clear, "Clear"),
        (Weather::Fog, "Fog"),
        (Weather::Rain, "Rain"),
        (Weather::Snow, "Snow"),
        (Weather::Storm, "Storm"),
    ];

    fn code(self) -> u8 {
        self as u8
    }
}

/// Whether the shipment falls on a holiday
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Holiday {
    /// Regular day
    No = 0,
    /// Holiday
    Yes = 1,
}

impl Vocabulary for Holiday {
    const NAME: &'static str = "holiday indicator";
    const TABLE: &'static [(Self, &'static str)] = &[(Holiday::No, "No"), (Holiday::Yes, "Yes")];

    fn code(self) -> u8 {
        self as u8
    }
}

/// Traffic along the route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Traffic {
    /// Heavy traffic
    High = 0,
    /// Light traffic
    Low = 1,
    /// Moderate traffic
    Moderate = 2,
}

impl Vocabulary for Traffic {
    const NAME: &'static str = "traffic condition";
    const TABLE: &'static [(Self, &'static str)] = &[
        (Traffic::High, "High"),
        (Traffic::Low, "Low"),
        (Traffic::Moderate, "Moderate"),
    ];

    fn code(self) -> u8 {
        self as u8
    }
}
