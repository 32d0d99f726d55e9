//! Widget state and its transitions.
//!
//! Every transition takes `&self` and returns the next state, so the owner
//! decides when a new state becomes visible. Rate lookups are numbered; only
//! the most recently started lookup may settle the state.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::amount::parse_amount;
use crate::domain::rates::RateTable;
use crate::ports::RateError;
use crate::CurrencyCode;

/// Outcome of the latest conversion as seen by a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Conversion {
    /// A lookup for the current inputs is outstanding.
    Pending,
    Converted { value: f64 },
    /// The latest lookup failed. The last good value, if any, is still held
    /// by the state.
    Failed { reason: String },
}

/// Snapshot of the inputs a lookup was started for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub seq: u64,
    pub amount: String,
    pub source: CurrencyCode,
    pub target: CurrencyCode,
}

impl LookupRequest {
    /// Applies the table to this request's inputs.
    pub fn convert(&self, table: &RateTable) -> Result<f64, RateError> {
        let rate = table
            .rate_for(self.target)
            .ok_or(RateError::RateNotAvailable(self.source, self.target))?;
        Ok(parse_amount(&self.amount) * rate)
    }
}

/// All interactive state owned by one converter widget.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetState {
    amount: String,
    source: CurrencyCode,
    target: CurrencyCode,
    /// Last good value and the currency it is denominated in
    result: Option<(f64, CurrencyCode)>,
    in_flight: bool,
    latest_request: u64,
    last_error: Option<String>,
}

impl Default for WidgetState {
    fn default() -> Self {
        let catalogue = CurrencyCode::all();
        Self {
            amount: "1".to_string(),
            source: catalogue[0],
            target: catalogue[1],
            result: None,
            in_flight: false,
            latest_request: 0,
            last_error: None,
        }
    }
}

impl WidgetState {
    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn source(&self) -> CurrencyCode {
        self.source
    }

    pub fn target(&self) -> CurrencyCode {
        self.target
    }

    /// Most recent successfully converted value.
    pub fn result(&self) -> Option<f64> {
        self.result.map(|(value, _)| value)
    }

    /// Target currency of the lookup that produced `result`. Differs from
    /// `target()` when a later lookup for a new target failed.
    pub fn result_currency(&self) -> Option<CurrencyCode> {
        self.result.map(|(_, currency)| currency)
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Sequence number of the most recently started lookup (0 before any).
    pub fn latest_request(&self) -> u64 {
        self.latest_request
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Input transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Stores the amount text verbatim.
    pub fn with_amount(&self, text: impl Into<String>) -> Self {
        Self {
            amount: text.into(),
            ..self.clone()
        }
    }

    pub fn with_source(&self, currency: CurrencyCode) -> Self {
        Self {
            source: currency,
            ..self.clone()
        }
    }

    pub fn with_target(&self, currency: CurrencyCode) -> Self {
        Self {
            target: currency,
            ..self.clone()
        }
    }

    /// Exchanges source and target.
    pub fn swapped(&self) -> Self {
        Self {
            source: self.target,
            target: self.source,
            ..self.clone()
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lookup transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Starts a lookup for the current inputs.
    pub fn begin_lookup(&self) -> (Self, LookupRequest) {
        let seq = self.latest_request + 1;
        let request = LookupRequest {
            seq,
            amount: self.amount.clone(),
            source: self.source,
            target: self.target,
        };
        let next = Self {
            in_flight: true,
            latest_request: seq,
            ..self.clone()
        };
        (next, request)
    }

    pub fn is_latest(&self, request: &LookupRequest) -> bool {
        request.seq == self.latest_request
    }

    /// Settles a lookup with its converted value or failure. Returns `None`
    /// when a newer lookup has started since `request`, in which case the
    /// outcome must be dropped.
    pub fn settle(&self, request: &LookupRequest, outcome: Result<f64, RateError>) -> Option<Self> {
        if !self.is_latest(request) {
            return None;
        }

        let next = match outcome {
            Ok(value) => Self {
                result: Some((value, request.target)),
                in_flight: false,
                last_error: None,
                ..self.clone()
            },
            Err(err) => Self {
                in_flight: false,
                last_error: Some(err.to_string()),
                ..self.clone()
            },
        };
        Some(next)
    }

    /// Tri-state view of the latest conversion; `None` before any lookup has
    /// started or succeeded.
    pub fn conversion(&self) -> Option<Conversion> {
        if self.in_flight {
            return Some(Conversion::Pending);
        }
        if let Some(reason) = &self.last_error {
            return Some(Conversion::Failed {
                reason: reason.clone(),
            });
        }
        self.result().map(|value| Conversion::Converted { value })
    }
}
