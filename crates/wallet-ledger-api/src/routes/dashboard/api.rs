//! Dashboard API endpoints - JSON API

use crate::{ApiError, AppState};
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use wallet_ledger_core::{DashboardResponse, Summary};

#[derive(Debug, Default, Deserialize)]
pub struct SummaryParams {
    pub q: Option<String>,
}

/// Totals of the transactions matching `q` (all of them when absent)
pub async fn api_summary(
    State(state): State<AppState>,
    Query(params): Query<SummaryParams>,
) -> Result<Json<Summary>, ApiError> {
    let ledger = state.ledger.read().await;
    let summary = ledger.summary(params.q.as_deref().unwrap_or(""))?;
    Ok(Json(summary))
}

/// Dashboard cards for the transactions matching `q`
pub async fn api_dashboard(
    State(state): State<AppState>,
    Query(params): Query<SummaryParams>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let ledger = state.ledger.read().await;
    Ok(Json(ledger.dashboard(params.q.as_deref().unwrap_or(""))?))
}
