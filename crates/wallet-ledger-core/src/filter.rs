//! Free-text search over a transaction set

use crate::error::{DefaultErrorLogger, ErrorContext, ErrorLogger};
use crate::models::Transaction;

/// Render an amount the way a search term is matched against it.
///
/// Shortest decimal form with no grouping or currency symbol, so `-150.0`
/// is `"-150"` and `12.5` is `"12.5"`. Non-finite amounts have no
/// rendering.
pub fn search_amount(amount: f64) -> Option<String> {
    if !amount.is_finite() {
        return None;
    }
    if amount == 0.0 {
        return Some("0".to_string());
    }
    Some(amount.to_string())
}

fn matches(transaction: &Transaction, needle: &str) -> Option<bool> {
    let amount = search_amount(transaction.amount)?;
    Some(
        transaction.remark.to_lowercase().contains(needle)
            || transaction.currency.to_lowercase().contains(needle)
            || transaction.transaction_type.as_str().to_lowercase().contains(needle)
            || transaction.date.to_lowercase().contains(needle)
            || amount.contains(needle),
    )
}

/// Keep the transactions matching `term`, in input order.
///
/// A blank term returns the input unchanged. Otherwise the whole term,
/// surrounding spaces included, is matched case-insensitively as a
/// substring of remark, currency, type, the raw date string or the
/// rendered amount.
pub fn filter_transactions(transactions: &[Transaction], term: &str) -> Vec<Transaction> {
    filter_transactions_with_logger(transactions, term, &DefaultErrorLogger)
}

/// [`filter_transactions`] with an explicit diagnostic sink.
///
/// A record that cannot be matched (non-finite amount) is left out of the
/// result and reported through `logger`; the other records are unaffected.
pub fn filter_transactions_with_logger(
    transactions: &[Transaction],
    term: &str,
    logger: &dyn ErrorLogger,
) -> Vec<Transaction> {
    if term.trim().is_empty() {
        return transactions.to_vec();
    }

    let needle = term.to_lowercase();
    let mut result = Vec::new();
    for transaction in transactions {
        match matches(transaction, &needle) {
            Some(true) => result.push(transaction.clone()),
            Some(false) => {}
            None => {
                log::warn!(
                    target: "wallet_ledger::filter",
                    "skipping transaction {} during search",
                    transaction.id
                );
                logger.log_warning(
                    "Transaction amount is not a finite number",
                    &ErrorContext::new("filter_transactions")
                        .with_data("id", serde_json::json!(transaction.id))
                        .with_data("term", serde_json::json!(term)),
                );
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::types::TransactionType;
    use std::cell::RefCell;

    fn tx(id: &str, date: &str, remark: &str, amount: f64, kind: TransactionType) -> Transaction {
        Transaction {
            id: id.to_string(),
            date: date.to_string(),
            remark: remark.to_string(),
            amount,
            currency: "USD".to_string(),
            transaction_type: kind,
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx("1", "2023-10-01", "Salary", 3000.0, TransactionType::Credit),
            tx("2", "2023-10-02", "Groceries", -150.0, TransactionType::Debit),
            tx("3", "2023-10-03", "Gym Membership", -50.0, TransactionType::Debit),
            tx("4", "2023-11-04", "Refund", 12.5, TransactionType::Credit),
        ]
    }

    fn ids(transactions: &[Transaction]) -> Vec<&str> {
        transactions.iter().map(|t| t.id.as_str()).collect()
    }

    #[derive(Default)]
    struct RecordingLogger {
        warnings: RefCell<Vec<String>>,
    }

    impl ErrorLogger for RecordingLogger {
        fn log_error(&self, _error: &CoreError, _context: &ErrorContext) {}

        fn log_warning(&self, message: &str, context: &ErrorContext) {
            self.warnings
                .borrow_mut()
                .push(format!("{}: {}", context.operation, message));
        }
    }

    #[test]
    fn test_blank_term_is_identity() {
        let data = sample();
        assert_eq!(filter_transactions(&data, ""), data);
        assert_eq!(filter_transactions(&data, "   "), data);
    }

    #[test]
    fn test_matches_remark_case_insensitively() {
        let result = filter_transactions(&sample(), "GROC");
        assert_eq!(ids(&result), vec!["2"]);
    }

    #[test]
    fn test_surrounding_spaces_are_part_of_the_term() {
        assert!(filter_transactions(&sample(), "salary ").is_empty());
        assert!(filter_transactions(&sample(), " groceries").is_empty());
        assert_eq!(ids(&filter_transactions(&sample(), "gym m")), vec!["3"]);
    }

    #[test]
    fn test_matches_type() {
        let result = filter_transactions(&sample(), "debit");
        assert_eq!(ids(&result), vec!["2", "3"]);
    }

    #[test]
    fn test_matches_raw_date() {
        let result = filter_transactions(&sample(), "2023-11");
        assert_eq!(ids(&result), vec!["4"]);
    }

    #[test]
    fn test_matches_rendered_amount() {
        assert_eq!(ids(&filter_transactions(&sample(), "-150")), vec!["2"]);
        assert_eq!(ids(&filter_transactions(&sample(), "12.5")), vec!["4"]);
        // No currency formatting is applied before matching
        assert!(filter_transactions(&sample(), "3,000").is_empty());
    }

    #[test]
    fn test_matches_currency() {
        assert_eq!(filter_transactions(&sample(), "usd").len(), 4);
    }

    #[test]
    fn test_result_is_sound_and_stable() {
        let data = sample();
        let result = filter_transactions(&data, "e");
        let positions: Vec<usize> = result
            .iter()
            .map(|r| data.iter().position(|d| d == r).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_non_finite_amount_is_skipped_and_logged() {
        let mut data = sample();
        data.insert(1, tx("bad", "2023-10-01", "Salary bonus", f64::NAN, TransactionType::Credit));

        let logger = RecordingLogger::default();
        let result = filter_transactions_with_logger(&data, "salary", &logger);

        assert_eq!(ids(&result), vec!["1"]);
        assert_eq!(logger.warnings.borrow().len(), 1);
        assert!(logger.warnings.borrow()[0].starts_with("filter_transactions"));
    }

    #[test]
    fn test_search_amount_rendering() {
        assert_eq!(search_amount(-150.0).as_deref(), Some("-150"));
        assert_eq!(search_amount(0.1).as_deref(), Some("0.1"));
        assert_eq!(search_amount(-0.0).as_deref(), Some("0"));
        assert_eq!(search_amount(f64::INFINITY), None);
    }
}
