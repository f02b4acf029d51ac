//! Transactions API endpoints
//!
//! Endpoints:
//! - api_transactions: filtered, sorted, paginated listing
//! - api_recent_transactions: newest transactions first
//! - api_transaction_detail: single transaction
//! - api_validate_transactions: check a raw batch of candidate records

use crate::{ApiError, AppState};
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use std::str::FromStr;
use wallet_ledger_core::{
    validate_batch_value, CoreError, TransactionQuery, TransactionView, TransactionsResponse,
    ValidationReport,
};

/// Query string of the listing endpoint. Values stay raw so that a bad one
/// is reported as `INVALID_INPUT` instead of a bare rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub q: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub page: Option<String>,
    pub per_page: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecentParams {
    pub count: Option<String>,
}

fn parse_param<T>(name: &str, value: Option<&str>) -> Result<Option<T>, CoreError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(|e| CoreError::InvalidInput {
            message: format!("Invalid {} '{}': {}", name, raw, e),
        }),
    }
}

impl ListParams {
    pub fn into_query(self) -> Result<TransactionQuery, CoreError> {
        Ok(TransactionQuery {
            sort_field: parse_param("sort", self.sort.as_deref())?,
            sort_order: parse_param("order", self.order.as_deref())?,
            page: parse_param("page", self.page.as_deref())?,
            per_page: parse_param("per_page", self.per_page.as_deref())?,
            search: self.q,
        })
    }
}

/// Get transactions with search, sort and pagination (JSON API)
pub async fn api_transactions(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<TransactionsResponse>, ApiError> {
    let query = params.into_query()?;
    let ledger = state.ledger.read().await;
    Ok(Json(ledger.query(&query)?))
}

/// Get the newest transactions (JSON API)
pub async fn api_recent_transactions(
    State(state): State<AppState>,
    Query(params): Query<RecentParams>,
) -> Result<Json<Vec<TransactionView>>, ApiError> {
    let count = parse_param("count", params.count.as_deref())?
        .unwrap_or(state.config.dashboard.recent_count);

    let ledger = state.ledger.read().await;
    let style = ledger.amount_style();
    let recent = ledger
        .recent(count)?
        .into_iter()
        .map(|t| ledger.view(t, &style))
        .collect();
    Ok(Json(recent))
}

/// Get single transaction detail (JSON API)
pub async fn api_transaction_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TransactionView>, ApiError> {
    let ledger = state.ledger.read().await;
    let transaction = ledger.transaction(&id)?;
    Ok(Json(ledger.view(transaction, &ledger.amount_style())))
}

/// Validate a raw JSON array of candidate transactions.
///
/// Invalid records are reported in the body with status 200; only a body
/// that is not JSON, or not an array, is an error.
pub async fn api_validate_transactions(body: Bytes) -> Result<Json<ValidationReport>, ApiError> {
    let value: serde_json::Value = serde_json::from_slice(&body)
        .map_err(|e| ApiError::bad_request(format!("Request body is not valid JSON: {}", e)))?;
    let report = validate_batch_value(&value)?;
    log::debug!(
        "validated batch: {} error(s), {} warning(s)",
        report.errors.len(),
        report.warnings.len()
    );
    Ok(Json(report))
}
