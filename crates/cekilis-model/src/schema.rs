//! Explicit field-name to default-value tables for every known collection.
//!
//! A field that is absent, `null`, or of the wrong JSON type takes the default
//! listed here. Decoding therefore never fails.

use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use crate::{Collection, Document};

/// Typed entity decodable from a raw store document.
pub trait FromDocument: Sized {
    const COLLECTION: Collection;

    fn from_document(document: &Document) -> Self;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrField {
    pub key: &'static str,
    pub default: &'static str,
}

impl StrField {
    #[must_use]
    pub const fn new(key: &'static str, default: &'static str) -> Self {
        Self { key, default }
    }

    #[must_use]
    pub fn read(&self, document: &Document) -> String {
        document
            .get(self.key)
            .and_then(Value::as_str)
            .unwrap_or(self.default)
            .to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoolField {
    pub key: &'static str,
    pub default: bool,
}

impl BoolField {
    #[must_use]
    pub const fn new(key: &'static str, default: bool) -> Self {
        Self { key, default }
    }

    #[must_use]
    pub fn read(&self, document: &Document) -> bool {
        document
            .get(self.key)
            .and_then(Value::as_bool)
            .unwrap_or(self.default)
    }
}

/// Signed integer field, e.g. a prize value in currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntField {
    pub key: &'static str,
    pub default: i64,
}

impl IntField {
    #[must_use]
    pub const fn new(key: &'static str, default: i64) -> Self {
        Self { key, default }
    }

    #[must_use]
    pub fn read(&self, document: &Document) -> i64 {
        document
            .get(self.key)
            .and_then(integral)
            .unwrap_or(self.default)
    }
}

/// Non-negative integer field. Negative values count as mistyped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountField {
    pub key: &'static str,
    pub default: u64,
}

impl CountField {
    #[must_use]
    pub const fn new(key: &'static str, default: u64) -> Self {
        Self { key, default }
    }

    #[must_use]
    pub fn read(&self, document: &Document) -> u64 {
        document
            .get(self.key)
            .and_then(integral)
            .and_then(|v| u64::try_from(v).ok())
            .unwrap_or(self.default)
    }
}

/// Non-negative decimal price. The default is `units / 10^scale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceField {
    pub key: &'static str,
    pub default_units: i64,
    pub default_scale: u32,
}

impl PriceField {
    #[must_use]
    pub const fn new(key: &'static str, default_units: i64, default_scale: u32) -> Self {
        Self {
            key,
            default_units,
            default_scale,
        }
    }

    #[must_use]
    pub fn default_value(&self) -> Decimal {
        Decimal::new(self.default_units, self.default_scale)
    }

    #[must_use]
    pub fn read(&self, document: &Document) -> Decimal {
        document
            .get(self.key)
            .and_then(decimal)
            .filter(|price| !price.is_sign_negative())
            .unwrap_or_else(|| self.default_value())
    }
}

fn integral(value: &Value) -> Option<i64> {
    if let Some(v) = value.as_i64() {
        return Some(v);
    }
    let f = value.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => match number.as_i64() {
            Some(v) => Some(Decimal::from(v)),
            None => number.as_f64().and_then(Decimal::from_f64),
        },
        Value::String(raw) => Decimal::from_str(raw.trim()).ok(),
        _ => None,
    }
}

/// One row of a collection's default table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSpec {
    Str(StrField),
    Bool(BoolField),
    Int(IntField),
    Count(CountField),
    Price(PriceField),
}

impl FieldSpec {
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Str(f) => f.key,
            Self::Bool(f) => f.key,
            Self::Int(f) => f.key,
            Self::Count(f) => f.key,
            Self::Price(f) => f.key,
        }
    }

    #[must_use]
    pub fn default_json(&self) -> Value {
        match self {
            Self::Str(f) => json!(f.default),
            Self::Bool(f) => json!(f.default),
            Self::Int(f) => json!(f.default),
            Self::Count(f) => json!(f.default),
            Self::Price(f) => json!(f.default_value().to_string()),
        }
    }
}

pub mod ticket_fields {
    use super::{BoolField, CountField, IntField, PriceField, StrField};

    pub const CATEGORY: StrField = StrField::new("category", "");
    pub const DESCRIPTION: StrField = StrField::new("description", "");
    pub const IMAGE_URL: StrField = StrField::new("imageURL", "");
    pub const IS_AVAILABLE: BoolField = BoolField::new("isAvailable", true);
    pub const IS_LIVE: BoolField = BoolField::new("isLive", false);
    pub const PRIZE_COUNT: CountField = CountField::new("prizeCount", 2);
    pub const PRIZE_VALUE: IntField = IntField::new("prizeValue", 200);
    pub const PURCHASE_COUNT: CountField = CountField::new("purchaseCount", 5);
    pub const RAFFLE_DATE: StrField = StrField::new("raffleDateString", "");
    pub const TICKET_PRICE: PriceField = PriceField::new("ticketPrice", 50, 1);
    pub const TITLE: StrField = StrField::new("titleTicket", "");
    pub const TOTAL_TICKET: CountField = CountField::new("totalTicket", 10);
}

pub mod artwork_fields {
    use super::StrField;

    pub const CATEGORY: StrField = StrField::new("category", "");
    pub const PROMPT: StrField = StrField::new("prompt", "");
    pub const IMAGE_URL: StrField = StrField::new("imageURL", "");
}

pub const TICKET_SCHEMA: [FieldSpec; 12] = [
    FieldSpec::Str(ticket_fields::CATEGORY),
    FieldSpec::Str(ticket_fields::DESCRIPTION),
    FieldSpec::Str(ticket_fields::IMAGE_URL),
    FieldSpec::Bool(ticket_fields::IS_AVAILABLE),
    FieldSpec::Bool(ticket_fields::IS_LIVE),
    FieldSpec::Count(ticket_fields::PRIZE_COUNT),
    FieldSpec::Int(ticket_fields::PRIZE_VALUE),
    FieldSpec::Count(ticket_fields::PURCHASE_COUNT),
    FieldSpec::Str(ticket_fields::RAFFLE_DATE),
    FieldSpec::Price(ticket_fields::TICKET_PRICE),
    FieldSpec::Str(ticket_fields::TITLE),
    FieldSpec::Count(ticket_fields::TOTAL_TICKET),
];

pub const ARTWORK_SCHEMA: [FieldSpec; 3] = [
    FieldSpec::Str(artwork_fields::CATEGORY),
    FieldSpec::Str(artwork_fields::PROMPT),
    FieldSpec::Str(artwork_fields::IMAGE_URL),
];

#[must_use]
pub fn schema_for(collection: Collection) -> &'static [FieldSpec] {
    match collection {
        Collection::Tickets => &TICKET_SCHEMA,
        Collection::Artworks => &ARTWORK_SCHEMA,
    }
}
