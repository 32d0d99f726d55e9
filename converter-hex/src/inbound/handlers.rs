//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tokio::task::JoinHandle;
use utoipa::OpenApi;

use converter_types::{
    AppError, ConvertQuery, CurrencyCode, CurrencyInfo, RateProvider, SelectCurrencyRequest,
    SetAmountRequest, SettleQuery, WidgetView,
};

use super::page;
use crate::openapi::ApiDoc;
use crate::{ConverterWidget, convert_once};

/// Application state shared across handlers.
pub struct AppState<P: RateProvider> {
    pub widget: ConverterWidget<P>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Host page with the widget rendered from its current state.
pub async fn index<P: RateProvider + 'static>(
    State(state): State<Arc<AppState<P>>>,
) -> Html<String> {
    Html(page::render(&state.widget.view()))
}

/// The fixed currency catalogue.
pub async fn list_currencies() -> impl IntoResponse {
    let currencies: Vec<CurrencyInfo> = CurrencyCode::all().iter().map(|&c| c.into()).collect();
    Json(currencies)
}

/// Current widget view.
pub async fn get_widget<P: RateProvider + 'static>(
    State(state): State<Arc<AppState<P>>>,
) -> Json<WidgetView> {
    Json(state.widget.view())
}

#[tracing::instrument(skip(state))]
pub async fn set_amount<P: RateProvider + 'static>(
    State(state): State<Arc<AppState<P>>>,
    Query(query): Query<SettleQuery>,
    Json(req): Json<SetAmountRequest>,
) -> Result<Json<WidgetView>, ApiError> {
    let lookup = state.widget.set_amount(req.amount);
    respond(&state.widget, lookup, query.settle).await
}

#[tracing::instrument(skip(state), fields(currency = %req.currency))]
pub async fn select_source<P: RateProvider + 'static>(
    State(state): State<Arc<AppState<P>>>,
    Query(query): Query<SettleQuery>,
    Json(req): Json<SelectCurrencyRequest>,
) -> Result<Json<WidgetView>, ApiError> {
    let lookup = state.widget.select_source(req.currency);
    respond(&state.widget, lookup, query.settle).await
}

#[tracing::instrument(skip(state), fields(currency = %req.currency))]
pub async fn select_target<P: RateProvider + 'static>(
    State(state): State<Arc<AppState<P>>>,
    Query(query): Query<SettleQuery>,
    Json(req): Json<SelectCurrencyRequest>,
) -> Result<Json<WidgetView>, ApiError> {
    let lookup = state.widget.select_target(req.currency);
    respond(&state.widget, lookup, query.settle).await
}

#[tracing::instrument(skip(state))]
pub async fn swap<P: RateProvider + 'static>(
    State(state): State<Arc<AppState<P>>>,
    Query(query): Query<SettleQuery>,
) -> Result<Json<WidgetView>, ApiError> {
    let lookup = state.widget.swap();
    respond(&state.widget, lookup, query.settle).await
}

/// Stateless conversion through the widget's rate provider.
#[tracing::instrument(skip(state), fields(from = %query.from, to = %query.to))]
pub async fn convert<P: RateProvider + 'static>(
    State(state): State<Arc<AppState<P>>>,
    Query(query): Query<ConvertQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let from: CurrencyCode = query.from.parse().map_err(AppError::from)?;
    let to: CurrencyCode = query.to.parse().map_err(AppError::from)?;

    let resp = convert_once(state.widget.provider(), &query.amount, from, to)
        .await
        .map_err(AppError::from)?;
    Ok(Json(resp))
}

/// OpenAPI document for the JSON API.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Optionally waits for the lookup started by an update, then renders.
async fn respond<P: RateProvider + 'static>(
    widget: &ConverterWidget<P>,
    lookup: JoinHandle<()>,
    settle: bool,
) -> Result<Json<WidgetView>, ApiError> {
    if settle {
        lookup
            .await
            .map_err(|e| AppError::Internal(format!("rate lookup task failed: {}", e)))?;
    }
    Ok(Json(widget.view()))
}
