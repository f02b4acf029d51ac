//! Transaction processing for the wallet ledger
//!
//! The pure operations (`validate`, `filter_transactions`,
//! `sort_transactions`, `summarize`) work on slices and return new values.
//! [`Ledger`] holds the loaded working set and composes them per request:
//! filter, then sort, then summarize the filtered set before paging.

pub mod error;
pub mod filter;
pub mod models;
pub mod reports;
pub mod sort;
pub mod summary;
pub mod types;
pub mod validate;

pub use error::{
    CoreError, CoreResult, DefaultErrorLogger, ErrorCode, ErrorContext, ErrorDetails, ErrorLogger,
    ErrorSeverity,
};
pub use filter::{filter_transactions, filter_transactions_with_logger};
pub use models::{DashboardSummary, Summary, Transaction};
pub use reports::{
    DashboardResponse, LoadSummary, TransactionQuery, TransactionView, TransactionsResponse,
};
pub use sort::{sort_transactions, SortState};
pub use summary::summarize;
pub use types::{SortField, SortOrder, TransactionType};
pub use validate::{
    parse_batch, parse_transaction, sanitize, validate, validate_batch, validate_batch_value,
    FieldError, ValidationReport,
};

use wallet_ledger_config::{Config, InvalidRecordPolicy, SymbolPosition};
use wallet_ledger_source::{SourceRef, TransactionSourceTrait};
use wallet_ledger_utils::{
    empty_state_message, format_amount, paginate, safe_format_date, AmountStyle, ViewContext,
};

/// Loaded transaction set plus the configuration it is served with
pub struct Ledger {
    config: Config,
    source: SourceRef,
    transactions: Option<Vec<Transaction>>,
    last_load: Option<LoadSummary>,
}

impl Ledger {
    /// Create an empty ledger; nothing is read until [`Ledger::load`]
    pub fn new(config: Config, source: SourceRef) -> Self {
        Self {
            config,
            source,
            transactions: None,
            last_load: None,
        }
    }

    /// Read and validate every record from the source.
    ///
    /// Under the `reject` policy any invalid record fails the load with
    /// `ValidationFailure` and the previously loaded set stays in place.
    /// Under `sanitize` invalid records are coerced and kept.
    pub async fn load(&mut self) -> CoreResult<LoadSummary> {
        let candidates = self.source.load().await?;
        let report = validate_batch(&candidates);

        for warning in &report.warnings {
            log::warn!("{}: {}", warning.field, warning.message);
        }

        let mut sanitized = 0;
        let transactions = match self.config.data.invalid_records {
            InvalidRecordPolicy::Reject => {
                if !report.valid {
                    let error = CoreError::ValidationFailure {
                        errors: report.errors,
                    };
                    DefaultErrorLogger.log_error(
                        &error,
                        &ErrorContext::new("load")
                            .with_data("source", serde_json::json!(self.source.describe())),
                    );
                    return Err(error);
                }
                candidates.iter().map(sanitize).collect::<Vec<_>>()
            }
            InvalidRecordPolicy::Sanitize => candidates
                .iter()
                .enumerate()
                .map(|(index, candidate)| {
                    let check = validate(candidate);
                    if !check.valid {
                        sanitized += 1;
                        log::warn!(
                            "sanitizing record {} from {}: {} invalid field(s)",
                            index,
                            self.source.describe(),
                            check.errors.len()
                        );
                    }
                    sanitize(candidate)
                })
                .collect(),
        };

        let summary = LoadSummary {
            source: self.source.describe(),
            loaded: transactions.len(),
            sanitized,
            warnings: report.warnings,
        };
        log::info!(
            "Loaded {} transactions from {}",
            summary.loaded,
            summary.source
        );

        self.transactions = Some(transactions);
        self.last_load = Some(summary.clone());
        Ok(summary)
    }

    /// Re-read the source, replacing the working set on success
    pub async fn reload(&mut self) -> CoreResult<LoadSummary> {
        log::info!("Reloading transactions from {}", self.source.describe());
        self.load().await
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_loaded(&self) -> bool {
        self.transactions.is_some()
    }

    /// Outcome of the most recent successful load
    pub fn last_load(&self) -> Option<&LoadSummary> {
        self.last_load.as_ref()
    }

    /// Every loaded transaction in source order
    pub fn transactions(&self) -> CoreResult<&[Transaction]> {
        self.transactions.as_deref().ok_or(CoreError::NotLoaded)
    }

    /// Get a single transaction by id
    pub fn transaction(&self, id: &str) -> CoreResult<Transaction> {
        self.transactions()?
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| CoreError::TransactionNotFound { id: id.to_string() })
    }

    /// Transactions matching a search term
    pub fn working_set(&self, search: &str) -> CoreResult<Vec<Transaction>> {
        Ok(filter_transactions(self.transactions()?, search))
    }

    /// Totals of the transactions matching a search term
    pub fn summary(&self, search: &str) -> CoreResult<Summary> {
        Ok(summarize(&self.working_set(search)?))
    }

    /// Latest `count` transactions, newest first
    pub fn recent(&self, count: usize) -> CoreResult<Vec<Transaction>> {
        let mut sorted =
            sort_transactions(self.transactions()?, SortField::Date, SortOrder::Descending)?;
        sorted.truncate(count);
        Ok(sorted)
    }

    /// Sort applied when a listing request does not name one
    pub fn default_sort(&self) -> SortState {
        let table = &self.config.table;
        SortState::new(
            table.default_sort_field.parse().unwrap_or_default(),
            table.default_sort_order.parse().unwrap_or_default(),
        )
    }

    /// Display style built from the currency settings
    pub fn amount_style(&self) -> AmountStyle {
        let currency = &self.config.currency;
        AmountStyle {
            symbol: currency.symbol.clone(),
            decimal_places: currency.decimal_places,
            thousands_separator: currency.thousands_separator.clone(),
            decimal_separator: currency.decimal_separator.clone(),
            symbol_before: currency.symbol_position == SymbolPosition::Before,
        }
    }

    pub fn view(&self, transaction: Transaction, style: &AmountStyle) -> TransactionView {
        TransactionView {
            formatted_amount: format_amount(transaction.amount, style),
            formatted_date: safe_format_date(&transaction.date),
            sign_matches_type: transaction.sign_matches_type(),
            transaction,
        }
    }

    /// One page of the transaction table.
    ///
    /// Filters by the search term, sorts the matches, summarizes all of
    /// them and then cuts out the requested page.
    pub fn query(&self, query: &TransactionQuery) -> CoreResult<TransactionsResponse> {
        let per_page = query
            .per_page
            .unwrap_or(self.config.pagination.records_per_page);
        if !self.config.is_page_size_allowed(per_page) {
            return Err(CoreError::InvalidInput {
                message: format!(
                    "Page size {} is not one of {:?}",
                    per_page, self.config.pagination.page_size_options
                ),
            });
        }

        let search = query.search.clone().unwrap_or_default();
        let default_sort = self.default_sort();
        let sort = SortState::new(
            query.sort_field.unwrap_or(default_sort.field),
            query.sort_order.unwrap_or(default_sort.order),
        );

        let all = self.transactions()?;
        let matched = filter_transactions(all, &search);
        let sorted = sort.apply(&matched)?;
        let summary = summarize(&sorted);
        let page = paginate(&sorted, query.page.unwrap_or(1), per_page);

        let empty_message = if sorted.is_empty() {
            Some(empty_state_message(
                ViewContext::Transactions,
                Some(search.as_str()),
            ))
        } else {
            None
        };

        let style = self.amount_style();
        Ok(TransactionsResponse {
            transactions: page
                .items
                .into_iter()
                .map(|t| self.view(t, &style))
                .collect(),
            total_count: all.len(),
            filtered_count: sorted.len(),
            page: page.page,
            per_page: page.per_page,
            total_pages: page.total_pages,
            search,
            sort,
            summary,
            page_size_options: self.config.pagination.page_size_options.clone(),
            empty_message,
        })
    }

    /// Summary cards and the latest transactions matching a search term.
    ///
    /// Cards and the recent list are computed from the same filtered set
    /// the transaction table shows.
    pub fn dashboard(&self, search: &str) -> CoreResult<DashboardResponse> {
        let matched = self.working_set(search)?;
        let summary =
            DashboardSummary::from_summary(&summarize(&matched), self.config.dashboard.baseline);
        let mut recent = sort_transactions(&matched, SortField::Date, SortOrder::Descending)?;
        recent.truncate(self.config.dashboard.recent_count);
        let style = self.amount_style();

        Ok(DashboardResponse {
            formatted_balance: format_amount(summary.total_balance, &style),
            formatted_credits: format_amount(summary.total_credits, &style),
            formatted_debits: format_amount(summary.total_debits, &style),
            recent: recent.into_iter().map(|t| self.view(t, &style)).collect(),
            currency: self.config.currency.default_currency.clone(),
            search: search.to_string(),
            summary,
        })
    }
}
