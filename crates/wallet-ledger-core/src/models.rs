//! Core data models for the ledger

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::types::TransactionType;

/// One ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction identifier
    pub id: String,
    /// Transaction date, canonically YYYY-MM-DD
    pub date: String,
    /// Free-text description
    pub remark: String,
    /// Signed amount: positive is money in, negative is money out
    pub amount: f64,
    /// Currency code (e.g. "USD")
    pub currency: String,
    /// Credit or debit
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

impl Transaction {
    /// The point in time this transaction is ordered by.
    ///
    /// Accepts `YYYY-MM-DD` (midnight) or an RFC 3339 timestamp (as UTC).
    pub fn instant(&self) -> Option<NaiveDateTime> {
        parse_instant(&self.date)
    }

    /// Whether the amount sign agrees with the type.
    ///
    /// Advisory only: nothing rejects a record for disagreeing. Zero agrees
    /// with either type.
    pub fn sign_matches_type(&self) -> bool {
        match self.transaction_type {
            TransactionType::Credit => self.amount >= 0.0,
            TransactionType::Debit => self.amount <= 0.0,
        }
    }

    /// Amount with non-finite values treated as zero
    pub fn amount_or_zero(&self) -> f64 {
        if self.amount.is_finite() {
            self.amount
        } else {
            0.0
        }
    }
}

pub(crate) fn parse_instant(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.naive_utc())
}

/// Aggregate totals of a working set
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Summary {
    /// Sum of all amounts
    pub total_balance: f64,
    /// Sum of positive amounts
    pub total_income: f64,
    /// Magnitude of the sum of negative amounts
    pub total_expenses: f64,
    /// Number of transactions summarized
    pub transaction_count: usize,
}

/// Summary cards for the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_balance: f64,
    pub total_credits: f64,
    pub total_debits: f64,
    pub transaction_count: usize,
    /// Balance as a percentage of the baseline, one decimal place
    pub balance_change: f64,
    /// Credits as a percentage of the baseline, one decimal place
    pub credits_change: f64,
    /// Debits as a percentage of the baseline, one decimal place
    pub debits_change: f64,
}

impl DashboardSummary {
    /// Derive the dashboard cards from a summary.
    ///
    /// A baseline that is zero or not finite yields zero percentages.
    pub fn from_summary(summary: &Summary, baseline: f64) -> Self {
        let percent = |value: f64| {
            if baseline.is_finite() && baseline != 0.0 {
                (value / baseline * 1000.0).round() / 10.0
            } else {
                0.0
            }
        };

        Self {
            total_balance: summary.total_balance,
            total_credits: summary.total_income,
            total_debits: summary.total_expenses,
            transaction_count: summary.transaction_count,
            balance_change: percent(summary.total_balance),
            credits_change: percent(summary.total_income),
            debits_change: percent(summary.total_expenses),
        }
    }
}
