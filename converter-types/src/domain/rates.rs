//! Rate table returned by a rate provider for one base currency.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::CurrencyCode;

/// Current rates for a base currency, keyed by target currency code.
///
/// Providers usually quote far more currencies than the catalogue holds, so
/// keys are plain codes rather than [`CurrencyCode`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RateTable {
    pub base: CurrencyCode,
    /// Publication date reported by the provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Last time the provider refreshed its quotes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Units of each target per one unit of `base`
    pub rates: HashMap<String, f64>,
}

impl RateTable {
    pub fn new(base: CurrencyCode, rates: HashMap<String, f64>) -> Self {
        Self {
            base,
            date: None,
            updated_at: None,
            rates,
        }
    }

    /// Rate for `target`, if the provider quoted it.
    pub fn rate_for(&self, target: CurrencyCode) -> Option<f64> {
        self.rates.get(target.code()).copied()
    }

    /// Rates for the catalogue currencies only, in catalogue order.
    pub fn catalogue_rates(&self) -> Vec<(CurrencyCode, f64)> {
        CurrencyCode::all()
            .iter()
            .filter_map(|&c| self.rate_for(c).map(|r| (c, r)))
            .collect()
    }
}
