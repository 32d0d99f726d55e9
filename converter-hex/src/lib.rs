//! # Converter Hex
//!
//! Widget service layer and HTTP adapter for the currency converter.
//!
//! ## Architecture
//!
//! - `widget/` - Converter widget (owns state, drives rate lookups)
//! - `inbound/` - HTTP adapter (Axum server hosting the page and JSON API)
//! - `openapi/` - OpenAPI document for the JSON API
//!
//! The widget is generic over `P: RateProvider`, allowing
//! different rate sources to be injected.

pub mod inbound;
pub mod openapi;
pub mod widget;

#[cfg(test)]
mod widget_tests;

pub use widget::{ConverterWidget, convert_once};
