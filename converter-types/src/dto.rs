//! Data Transfer Objects (DTOs) for requests and responses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::CurrencyCode;
use crate::domain::{Conversion, WidgetState, format_result};

// ─────────────────────────────────────────────────────────────────────────────
// Catalogue DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// One entry of the currency picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CurrencyInfo {
    pub code: CurrencyCode,
    #[schema(example = "Euro")]
    pub name: String,
    #[schema(example = "€")]
    pub symbol: String,
    #[schema(example = "🇪🇺")]
    pub flag: String,
}

impl From<CurrencyCode> for CurrencyInfo {
    fn from(code: CurrencyCode) -> Self {
        Self {
            code,
            name: code.name().to_string(),
            symbol: code.symbol().to_string(),
            flag: code.flag().to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Widget DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Render model of the widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WidgetView {
    /// Raw amount text as entered
    #[schema(example = "10")]
    pub amount: String,
    pub source: CurrencyInfo,
    pub target: CurrencyInfo,
    /// True while a rate lookup for the current inputs is outstanding
    pub loading: bool,
    /// Last successfully converted value (`null` when absent or not a number)
    pub result: Option<f64>,
    /// Result panel text, present when not loading and a result exists
    #[schema(example = "9.20 EUR")]
    pub display: Option<String>,
    /// Reason the latest lookup failed, if it did
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion: Option<Conversion>,
}

impl From<&WidgetState> for WidgetView {
    fn from(state: &WidgetState) -> Self {
        let loading = state.in_flight();
        let display = match (state.result(), state.result_currency()) {
            (Some(value), Some(currency)) if !loading => Some(format_result(value, currency)),
            _ => None,
        };
        Self {
            amount: state.amount().to_string(),
            source: state.source().into(),
            target: state.target().into(),
            loading,
            result: state.result(),
            display,
            error: state.last_error().map(String::from),
            conversion: state.conversion(),
        }
    }
}

/// Request to replace the amount text.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SetAmountRequest {
    #[schema(example = "10")]
    pub amount: String,
}

/// Request to select a source or target currency.
///
/// The code is matched case-insensitively, like every other currency input.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SelectCurrencyRequest {
    pub currency: CurrencyCode,
}

impl<'de> Deserialize<'de> for SelectCurrencyRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Inner {
            currency: String,
        }
        let Inner { currency } = Inner::deserialize(deserializer)?;
        let currency = currency.parse().map_err(serde::de::Error::custom)?;
        Ok(Self { currency })
    }
}

/// Query flag asking a widget update to wait for its lookup to settle.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SettleQuery {
    #[serde(default)]
    pub settle: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// One-shot Conversion DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Query for a stateless conversion.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConvertQuery {
    #[serde(default = "default_amount")]
    #[schema(example = "10")]
    pub amount: String,
    #[schema(example = "USD")]
    pub from: String,
    #[schema(example = "EUR")]
    pub to: String,
}

fn default_amount() -> String {
    "1".to_string()
}

/// Result of a stateless conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConversionResponse {
    pub amount: String,
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    #[schema(example = 0.92)]
    pub rate: f64,
    pub result: Option<f64>,
    #[schema(example = "9.20 EUR")]
    pub display: String,
    /// Provider publication date of the rate used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}
