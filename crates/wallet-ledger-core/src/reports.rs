//! Report structures for API responses

use serde::{Deserialize, Serialize};

use super::models::{DashboardSummary, Summary, Transaction};
use super::sort::SortState;
use super::types::{SortField, SortOrder};
use super::validate::FieldError;

/// A transaction with its display strings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionView {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub formatted_amount: String,
    pub formatted_date: String,
    /// False when a credit carries a negative amount or a debit a positive one
    pub sign_matches_type: bool,
}

/// Listing request: search, sort and page selection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionQuery {
    pub search: Option<String>,
    pub sort_field: Option<SortField>,
    pub sort_order: Option<SortOrder>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

/// Transactions list response for API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<TransactionView>,
    /// Records loaded, before searching
    pub total_count: usize,
    /// Records matching the search
    pub filtered_count: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
    pub search: String,
    pub sort: SortState,
    /// Totals of every matching record, not just this page
    pub summary: Summary,
    pub page_size_options: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

/// Dashboard response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub summary: DashboardSummary,
    /// Currency code the card totals are reported in
    pub currency: String,
    /// Search term the cards were computed for, empty for the whole ledger
    pub search: String,
    pub formatted_balance: String,
    pub formatted_credits: String,
    pub formatted_debits: String,
    pub recent: Vec<TransactionView>,
}

/// Outcome of loading the ledger from its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadSummary {
    pub source: String,
    pub loaded: usize,
    /// Records that failed validation and were kept in sanitized form
    pub sanitized: usize,
    pub warnings: Vec<FieldError>,
}
