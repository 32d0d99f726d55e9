//! # Converter Types
//!
//! Domain types and port traits for the currency converter widget.
//! This crate has ZERO external IO dependencies - only data structures,
//! state transitions, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (amount parsing, rate tables, widget state)
//! - `ports/` - Trait definitions that rate adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{Conversion, LookupRequest, RateTable, WidgetState, format_result, parse_amount};
pub use dto::*;
pub use error::AppError;
pub use exchange_rates::{CurrencyCode, UnknownCurrency};
pub use ports::{RateError, RateProvider};
