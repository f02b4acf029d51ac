//! Settings API endpoints - JSON API

use crate::AppState;
use axum::extract::State;
use axum::Json;
use wallet_ledger_config::{Config, SORT_FIELDS};

pub async fn api_settings(State(state): State<AppState>) -> Json<Config> {
    Json(state.config.clone())
}

/// Choices a client can offer for the table controls
pub async fn api_settings_metadata(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "sort_fields": SORT_FIELDS,
        "sort_orders": ["asc", "desc"],
        "page_size_options": state.config.pagination.page_size_options,
        "invalid_records": ["reject", "sanitize"],
    }))
}
