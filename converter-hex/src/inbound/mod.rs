//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server hosting the converter page and its JSON API.

mod handlers;
mod page;
mod server;

pub use handlers::{ApiError, AppState};
pub use server::HttpServer;
