//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The widget depends on these traits, not concrete implementations.

mod rates;

pub use rates::{RateError, RateProvider};
