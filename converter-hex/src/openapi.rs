//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use converter_types::dto::{
    ConversionResponse, CurrencyInfo, SelectCurrencyRequest, SetAmountRequest, WidgetView,
};
use converter_types::{Conversion, CurrencyCode};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// List the currency catalogue
#[utoipa::path(
    get,
    path = "/api/currencies",
    tag = "currencies",
    responses(
        (status = 200, description = "The fixed catalogue in picker order", body = [CurrencyInfo])
    )
)]
async fn list_currencies() {}

/// Current widget state
#[utoipa::path(
    get,
    path = "/api/widget",
    tag = "widget",
    responses(
        (status = 200, description = "Widget view", body = WidgetView)
    )
)]
async fn get_widget() {}

/// Replace the amount text
#[utoipa::path(
    post,
    path = "/api/widget/amount",
    tag = "widget",
    params(("settle" = Option<bool>, Query, description = "Wait for the triggered rate lookup")),
    request_body = SetAmountRequest,
    responses(
        (status = 200, description = "Widget view after the update", body = WidgetView)
    )
)]
async fn set_amount() {}

/// Select the source currency
#[utoipa::path(
    post,
    path = "/api/widget/source",
    tag = "widget",
    params(("settle" = Option<bool>, Query, description = "Wait for the triggered rate lookup")),
    request_body = SelectCurrencyRequest,
    responses(
        (status = 200, description = "Widget view after the update", body = WidgetView),
        (status = 422, description = "Currency is not in the catalogue")
    )
)]
async fn select_source() {}

/// Select the target currency
#[utoipa::path(
    post,
    path = "/api/widget/target",
    tag = "widget",
    params(("settle" = Option<bool>, Query, description = "Wait for the triggered rate lookup")),
    request_body = SelectCurrencyRequest,
    responses(
        (status = 200, description = "Widget view after the update", body = WidgetView),
        (status = 422, description = "Currency is not in the catalogue")
    )
)]
async fn select_target() {}

/// Exchange source and target
#[utoipa::path(
    post,
    path = "/api/widget/swap",
    tag = "widget",
    params(("settle" = Option<bool>, Query, description = "Wait for the triggered rate lookup")),
    responses(
        (status = 200, description = "Widget view after the swap", body = WidgetView)
    )
)]
async fn swap() {}

/// Stateless conversion
#[utoipa::path(
    get,
    path = "/api/convert",
    tag = "convert",
    params(
        ("amount" = Option<String>, Query, description = "Amount text, defaults to 1"),
        ("from" = String, Query, description = "Source currency code"),
        ("to" = String, Query, description = "Target currency code"),
    ),
    responses(
        (status = 200, description = "Converted amount", body = ConversionResponse),
        (status = 400, description = "Unknown currency"),
        (status = 502, description = "Rate provider failed or did not quote the target")
    )
)]
async fn convert() {}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Currency Converter API",
        version = "1.0.0",
        description = "Drives a single currency converter widget. Every widget update starts a live rate lookup; pass `?settle=true` to wait for it.",
        license(name = "MIT"),
    ),
    paths(
        health,
        list_currencies,
        get_widget,
        set_amount,
        select_source,
        select_target,
        swap,
        convert,
    ),
    components(
        schemas(
            CurrencyCode,
            CurrencyInfo,
            WidgetView,
            Conversion,
            SetAmountRequest,
            SelectCurrencyRequest,
            ConversionResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "currencies", description = "Currency catalogue"),
        (name = "widget", description = "Converter widget state and inputs"),
        (name = "convert", description = "One-shot conversions"),
    )
)]
pub struct ApiDoc;
