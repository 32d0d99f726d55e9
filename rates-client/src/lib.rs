//! # Rates Client
//!
//! Outbound adapters implementing the `RateProvider` port:
//! - [`ExchangeRateApiClient`] - live rates over HTTP
//! - [`ReferenceRateProvider`] - static reference rates for development

mod http;
mod reference;

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use converter_types::{RateError, RateProvider};

pub use http::{DEFAULT_BASE_URL, ExchangeRateApiClient};
pub use reference::ReferenceRateProvider;

/// Which adapter to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProviderKind {
    #[default]
    Live,
    Reference,
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown rate provider '{0}' (expected 'live' or 'reference')")]
pub struct UnknownProviderKind(pub String);

impl FromStr for ProviderKind {
    type Err = UnknownProviderKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "live" => Ok(ProviderKind::Live),
            "reference" => Ok(ProviderKind::Reference),
            _ => Err(UnknownProviderKind(s.to_string())),
        }
    }
}

/// Builds the configured rate provider.
pub fn build_provider(
    kind: ProviderKind,
    base_url: &str,
    timeout: Option<Duration>,
) -> Result<Arc<dyn RateProvider>, RateError> {
    match kind {
        ProviderKind::Live => {
            let mut client = ExchangeRateApiClient::new(base_url);
            if let Some(timeout) = timeout {
                client = client.with_timeout(timeout)?;
            }
            tracing::info!(base_url = client.base_url(), "Using live rate provider");
            Ok(Arc::new(client))
        }
        ProviderKind::Reference => {
            tracing::info!("Using reference rate provider");
            Ok(Arc::new(ReferenceRateProvider))
        }
    }
}
