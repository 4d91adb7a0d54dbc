//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{config, health, transactions};
use crate::state::AppState;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
///
/// ## Transactions (operator JWT auth)
/// - `POST /v1/transactions` - Process a sale
/// - `POST /v1/cashback` - Process a cashback redemption
/// - `POST /v1/balance` - Query a customer's balance
/// - `GET /v1/transactions` - Ledger history, newest first
/// - `POST /v1/transactions/export/csv` - CSV export
///
/// ## Configuration (operator JWT auth; PUT admin only)
/// - `GET /v1/config` - Tenant connection profile (redacted)
/// - `PUT /v1/config` - Replace the connection profile
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    Router::new()
        // Health (public)
        .route("/health", get(health::health))
        // Transactions
        .route("/v1/transactions", post(transactions::create_sale))
        .route("/v1/transactions", get(transactions::list_history))
        .route(
            "/v1/transactions/export/csv",
            post(transactions::export_csv),
        )
        .route("/v1/cashback", post(transactions::create_cashback))
        .route("/v1/balance", post(transactions::query_balance))
        // Configuration
        .route("/v1/config", get(config::get_config))
        .route("/v1/config", put(config::put_config))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
