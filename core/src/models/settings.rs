use serde::Serialize;
use serde_json::Value;

use super::FromRaw;
use crate::coerce;
use crate::error::MappingError;

/// Site-level search configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    /// Whether search is enabled for the site.
    pub status: bool,
    pub language_id: String,
    pub cta: Cta,
    pub currencies: Vec<Currency>,
    pub subscription: Subscription,
}

/// Formatting rules for one currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Currency {
    pub currency_code: String,
    pub decimal_point: String,
    pub thousands_separator: String,
    pub symbol: String,
    pub exchange_rate: f64,
    pub symbol_position: i64,
    pub remove_decimal_zero: bool,
    pub is_active: bool,
}

/// Prompts shown while the user types.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cta {
    pub typing: Vec<CtaTyping>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CtaTyping {
    pub id: i64,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Subscription {
    pub remove_branding: bool,
}

impl FromRaw for Settings {
    fn from_raw(raw: &Value) -> Result<Self, MappingError> {
        let obj = coerce::as_object(raw)?;
        Ok(Self {
            status: coerce::boolean(obj, "status")?,
            language_id: coerce::string(obj, "language_id")?,
            cta: coerce::nested(obj, "cta")?,
            currencies: coerce::list(obj, "currencies")?,
            subscription: coerce::nested(obj, "subscription")?,
        })
    }
}

impl FromRaw for Currency {
    fn from_raw(raw: &Value) -> Result<Self, MappingError> {
        let obj = coerce::as_object(raw)?;
        Ok(Self {
            currency_code: coerce::string(obj, "currency_code")?,
            decimal_point: coerce::string(obj, "decimal_point")?,
            thousands_separator: coerce::string(obj, "thousands_separator")?,
            symbol: coerce::string(obj, "symbol")?,
            exchange_rate: coerce::float(obj, "exchange_rate")?,
            symbol_position: coerce::int(obj, "symbol_position")?,
            remove_decimal_zero: coerce::boolean(obj, "remove_decimal_zero")?,
            is_active: coerce::boolean(obj, "is_active")?,
        })
    }
}

impl FromRaw for Cta {
    fn from_raw(raw: &Value) -> Result<Self, MappingError> {
        let obj = coerce::as_object(raw)?;
        Ok(Self {
            typing: coerce::list(obj, "typing")?,
        })
    }
}

impl FromRaw for CtaTyping {
    fn from_raw(raw: &Value) -> Result<Self, MappingError> {
        let obj = coerce::as_object(raw)?;
        Ok(Self {
            id: coerce::int(obj, "id")?,
            message: coerce::string(obj, "message")?,
        })
    }
}

impl FromRaw for Subscription {
    fn from_raw(raw: &Value) -> Result<Self, MappingError> {
        let obj = coerce::as_object(raw)?;
        Ok(Self {
            remove_branding: coerce::boolean(obj, "remove_branding")?,
        })
    }
}
