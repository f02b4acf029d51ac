//! JSON HTTP API for the wallet ledger
//!
//! Routes are organized into modules:
//! - routes::transactions: listing, search, sorting, lookup, validation
//! - routes::dashboard: summary totals and dashboard cards
//! - routes::settings: configuration display

pub mod error;
pub mod routes;

use axum::extract::State;
use axum::http::Method;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use wallet_ledger_config::Config;
use wallet_ledger_core::{Ledger, LoadSummary};

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<RwLock<Ledger>>,
    pub config: Config,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::dashboard::{api_dashboard, api_summary};
    use routes::settings::{api_settings, api_settings_metadata};
    use routes::transactions::{
        api_recent_transactions, api_transaction_detail, api_transactions,
        api_validate_transactions,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/transactions", get(api_transactions))
        .route("/api/transactions/recent", get(api_recent_transactions))
        .route("/api/transactions/validate", post(api_validate_transactions))
        .route("/api/transactions/:id", get(api_transaction_detail))
        .route("/api/summary", get(api_summary))
        .route("/api/dashboard", get(api_dashboard))
        .route("/api/settings", get(api_settings))
        .route("/api/settings/metadata", get(api_settings_metadata))
        .route("/api/reload", post(api_reload))
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Reload ledger API endpoint
async fn api_reload(State(state): State<AppState>) -> Result<Json<LoadSummary>, ApiError> {
    let mut ledger = state.ledger.write().await;
    Ok(Json(ledger.reload().await?))
}

/// Start the HTTP server
///
/// Binds to `server.host:server.port` and serves until the listener fails.
pub async fn start_server(config: Config, ledger: Arc<RwLock<Ledger>>) -> std::io::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState { ledger, config };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting Wallet Ledger server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - /api/transactions (search, sort, paginate)");
    log::info!("  - /api/dashboard (summary cards)");
    log::info!("  - /api/settings (configuration)");

    axum::serve(listener, router).await?;
    log::info!("Server stopped gracefully");
    Ok(())
}
