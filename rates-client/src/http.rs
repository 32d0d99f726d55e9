//! HTTP adapter for the public exchange rate API.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use reqwest::Client;
use serde::Deserialize;

use converter_types::{CurrencyCode, RateError, RateProvider, RateTable};

/// Endpoint prefix; the base currency code is appended as the last path segment.
pub const DEFAULT_BASE_URL: &str = "https://api.exchangerate-api.com/v4/latest";

/// Body of `GET {base_url}/{CODE}`.
#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    #[serde(default)]
    base: Option<String>,
    #[serde(default)]
    date: Option<NaiveDate>,
    #[serde(default)]
    time_last_updated: Option<i64>,
    rates: HashMap<String, f64>,
}

/// Rate provider backed by `api.exchangerate-api.com` (or any server speaking
/// the same `/latest/{CODE}` format).
pub struct ExchangeRateApiClient {
    base_url: String,
    http: Client,
}

impl ExchangeRateApiClient {
    /// Creates a new client without a request timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Applies a total request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, RateError> {
        self.http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RateError::Transport(e.to_string()))?;
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn latest_url(&self, base: CurrencyCode) -> String {
        format!("{}/{}", self.base_url, base.code())
    }

    async fn handle_response(
        &self,
        requested: CurrencyCode,
        resp: reqwest::Response,
    ) -> Result<RateTable, RateError> {
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| RateError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            return Err(RateError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: LatestRatesResponse =
            serde_json::from_str(&body).map_err(|e| RateError::Malformed(e.to_string()))?;

        if let Some(base) = &parsed.base {
            if !base.eq_ignore_ascii_case(requested.code()) {
                return Err(RateError::Malformed(format!(
                    "expected rates for {}, got {}",
                    requested, base
                )));
            }
        }

        Ok(RateTable {
            base: requested,
            date: parsed.date,
            updated_at: parsed
                .time_last_updated
                .and_then(|secs| DateTime::from_timestamp(secs, 0)),
            rates: parsed.rates,
        })
    }
}

impl Default for ExchangeRateApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl RateProvider for ExchangeRateApiClient {
    #[tracing::instrument(skip(self))]
    async fn latest(&self, base: CurrencyCode) -> Result<RateTable, RateError> {
        let url = self.latest_url(base);
        tracing::debug!(%url, "fetching latest rates");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| RateError::Transport(e.to_string()))?;

        self.handle_response(base, resp).await
    }
}
