//! Exchange rate provider port.
//!
//! This trait defines the interface for rate sources.
//! Implementations can be HTTP clients, static reference tables, mocks, etc.

use std::sync::Arc;

use crate::CurrencyCode;
use crate::domain::RateTable;

/// Error type for exchange rate operations.
#[derive(Debug, thiserror::Error)]
pub enum RateError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Provider returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed rate response: {0}")]
    Malformed(String),

    #[error("Rate not available for {0} -> {1}")]
    RateNotAvailable(CurrencyCode, CurrencyCode),
}

/// Port trait for exchange rate providers.
#[async_trait::async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetch the current rate table for `base`.
    async fn latest(&self, base: CurrencyCode) -> Result<RateTable, RateError>;

    /// Get the exchange rate from one currency to another.
    /// Returns how many units of `to` you get for 1 unit of `from`.
    async fn get_rate(&self, from: CurrencyCode, to: CurrencyCode) -> Result<f64, RateError> {
        let table = self.latest(from).await?;
        table
            .rate_for(to)
            .ok_or(RateError::RateNotAvailable(from, to))
    }
}

#[async_trait::async_trait]
impl<P: RateProvider + ?Sized> RateProvider for Arc<P> {
    async fn latest(&self, base: CurrencyCode) -> Result<RateTable, RateError> {
        (**self).latest(base).await
    }
}
