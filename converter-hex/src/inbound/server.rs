//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use converter_types::RateProvider;

use super::handlers::{self, AppState};
use crate::ConverterWidget;

/// HTTP Server hosting one converter widget.
pub struct HttpServer<P: RateProvider> {
    state: Arc<AppState<P>>,
}

impl<P: RateProvider + 'static> HttpServer<P> {
    /// Creates a new HTTP server around the given widget.
    pub fn new(widget: ConverterWidget<P>) -> Self {
        Self {
            state: Arc::new(AppState { widget }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        // Build HTTP metrics layer (uses globally set MeterProvider)
        let metrics = axum_otel_metrics::HttpMetricsLayerBuilder::new().build();

        Router::new()
            .route("/", get(handlers::index::<P>))
            .route("/health", get(handlers::health))
            .route("/api/currencies", get(handlers::list_currencies))
            .route("/api/widget", get(handlers::get_widget::<P>))
            .route("/api/widget/amount", post(handlers::set_amount::<P>))
            .route("/api/widget/source", post(handlers::select_source::<P>))
            .route("/api/widget/target", post(handlers::select_target::<P>))
            .route("/api/widget/swap", post(handlers::swap::<P>))
            .route("/api/convert", get(handlers::convert::<P>))
            .route("/api-docs/openapi.json", get(handlers::openapi_json))
            .layer(metrics)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
