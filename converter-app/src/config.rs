//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use rates_client::{DEFAULT_BASE_URL, ProviderKind};

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub rates_api_url: String,
    pub provider: ProviderKind,
    pub timeout: Option<Duration>,
    pub otel_endpoint: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("PORT must be a port number: {}", e))?;

        let rates_api_url = lookup("RATES_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let provider = match lookup("RATES_PROVIDER") {
            Some(kind) => kind.parse()?,
            None => ProviderKind::default(),
        };

        let timeout = lookup("RATES_TIMEOUT_SECS")
            .map(|secs| {
                secs.parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|e| anyhow::anyhow!("RATES_TIMEOUT_SECS must be whole seconds: {}", e))
            })
            .transpose()?;

        let otel_endpoint = lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|v| !v.is_empty());

        Ok(Self {
            port,
            rates_api_url,
            provider,
            timeout,
            otel_endpoint,
        })
    }
}
