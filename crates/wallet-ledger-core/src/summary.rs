//! Totals over a transaction set

use crate::models::{Summary, Transaction};

/// Reduce a set of transactions to its totals.
///
/// Non-finite amounts count as zero. An empty set yields the zero summary.
pub fn summarize(transactions: &[Transaction]) -> Summary {
    transactions.iter().fold(
        Summary {
            transaction_count: transactions.len(),
            ..Summary::default()
        },
        |mut summary, transaction| {
            let amount = transaction.amount_or_zero();
            summary.total_balance += amount;
            if amount > 0.0 {
                summary.total_income += amount;
            } else if amount < 0.0 {
                summary.total_expenses -= amount;
            }
            summary
        },
    )
}
