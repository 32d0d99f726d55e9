//! Error types for the converter service.

use crate::UnknownCurrency;
use crate::ports::RateError;

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Rate provider unavailable: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RateError> for AppError {
    fn from(err: RateError) -> Self {
        // The provider is only ever asked for catalogue currencies, so every
        // failure is on its side.
        match err {
            e @ (RateError::Transport(_)
            | RateError::Status { .. }
            | RateError::Malformed(_)
            | RateError::RateNotAvailable(..)) => AppError::Upstream(e.to_string()),
        }
    }
}

impl From<UnknownCurrency> for AppError {
    fn from(err: UnknownCurrency) -> Self {
        AppError::BadRequest(err.to_string())
    }
}
