//! Rate provider serving the catalogue's static reference rates.

use async_trait::async_trait;

use converter_types::{CurrencyCode, RateError, RateProvider, RateTable};

/// Answers every lookup from the reference valuations in `exchange-rates`.
/// Never fails and never touches the network.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReferenceRateProvider;

#[async_trait]
impl RateProvider for ReferenceRateProvider {
    async fn latest(&self, base: CurrencyCode) -> Result<RateTable, RateError> {
        Ok(RateTable::new(base, exchange_rates::reference_rates(base)))
    }
}
