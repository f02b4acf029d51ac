//! Ordering of transaction sets

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::{CoreError, CoreResult};
use crate::models::{parse_instant, Transaction};
use crate::types::{SortField, SortOrder};

enum SortKey {
    Instant(NaiveDateTime),
    Magnitude(f64),
    Text(String),
}

impl SortKey {
    fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Instant(a), SortKey::Instant(b)) => a.cmp(b),
            (SortKey::Magnitude(a), SortKey::Magnitude(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            // Keys of one call are always built for the same field
            _ => Ordering::Equal,
        }
    }
}

fn sort_key(transaction: &Transaction, field: SortField) -> CoreResult<SortKey> {
    let key = match field {
        SortField::Date => {
            let instant = parse_instant(&transaction.date).ok_or_else(|| CoreError::MalformedData {
                id: transaction.id.clone(),
                field: "date".to_string(),
                value: transaction.date.clone(),
                message: "date cannot be parsed".to_string(),
            })?;
            SortKey::Instant(instant)
        }
        SortField::Amount => SortKey::Magnitude(transaction.amount.abs()),
        SortField::Remark => SortKey::Text(transaction.remark.to_lowercase()),
        SortField::Currency => SortKey::Text(transaction.currency.to_lowercase()),
        SortField::Type => SortKey::Text(transaction.transaction_type.as_str().to_lowercase()),
    };
    Ok(key)
}

/// Return a new vector ordered by `field` in direction `order`.
///
/// Amounts compare by magnitude, dates chronologically and text fields
/// case-insensitively. Equal keys keep their input order in both
/// directions. Fails with `MalformedData` if any date is unparsable when
/// sorting by date; the input is never modified.
pub fn sort_transactions(
    transactions: &[Transaction],
    field: SortField,
    order: SortOrder,
) -> CoreResult<Vec<Transaction>> {
    let mut keyed = transactions
        .iter()
        .map(|t| sort_key(t, field).map(|key| (key, t)))
        .collect::<CoreResult<Vec<_>>>()?;

    keyed.sort_by(|(a, _), (b, _)| match order {
        SortOrder::Ascending => a.compare(b),
        SortOrder::Descending => b.compare(a),
    });

    Ok(keyed.into_iter().map(|(_, t)| t.clone()).collect())
}

/// Current sort column and direction of a table view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortState {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Header click: the active column flips direction, another column
    /// becomes active in ascending order.
    pub fn toggle(self, field: SortField) -> Self {
        if self.field == field {
            Self::new(field, self.order.reversed())
        } else {
            Self::new(field, SortOrder::Ascending)
        }
    }

    pub fn apply(&self, transactions: &[Transaction]) -> CoreResult<Vec<Transaction>> {
        sort_transactions(transactions, self.field, self.order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionType;

    fn tx(id: &str, date: &str, remark: &str, amount: f64) -> Transaction {
        Transaction {
            id: id.to_string(),
            date: date.to_string(),
            remark: remark.to_string(),
            amount,
            currency: "USD".to_string(),
            transaction_type: if amount >= 0.0 {
                TransactionType::Credit
            } else {
                TransactionType::Debit
            },
        }
    }

    fn ids(transactions: &[Transaction]) -> Vec<&str> {
        transactions.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_sort_by_date() {
        let data = vec![
            tx("a", "2023-10-03", "c", -1.0),
            tx("b", "2023-10-01", "a", -1.0),
            tx("c", "2023-10-02", "b", -1.0),
        ];

        let asc = sort_transactions(&data, SortField::Date, SortOrder::Ascending).unwrap();
        assert_eq!(ids(&asc), vec!["b", "c", "a"]);

        let desc = sort_transactions(&data, SortField::Date, SortOrder::Descending).unwrap();
        assert_eq!(ids(&desc), vec!["a", "c", "b"]);

        // Input untouched
        assert_eq!(ids(&data), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_accepts_timestamps() {
        let data = vec![
            tx("late", "2023-10-01T18:00:00Z", "x", 1.0),
            tx("early", "2023-10-01", "x", 1.0),
            tx("offset", "2023-10-01T12:00:00+02:00", "x", 1.0),
        ];
        let asc = sort_transactions(&data, SortField::Date, SortOrder::Ascending).unwrap();
        assert_eq!(ids(&asc), vec!["early", "offset", "late"]);
    }

    #[test]
    fn test_equal_keys_keep_input_order_both_ways() {
        let data = vec![
            tx("1", "2023-10-01", "x", 1.0),
            tx("2", "2023-10-02", "x", 1.0),
            tx("3", "2023-10-01", "x", 1.0),
        ];

        let asc = sort_transactions(&data, SortField::Date, SortOrder::Ascending).unwrap();
        assert_eq!(ids(&asc), vec!["1", "3", "2"]);

        let desc = sort_transactions(&data, SortField::Date, SortOrder::Descending).unwrap();
        assert_eq!(ids(&desc), vec!["2", "1", "3"]);
    }

    #[test]
    fn test_amount_sorts_by_magnitude() {
        let data = vec![
            tx("a", "2023-10-01", "x", -500.0),
            tx("b", "2023-10-01", "x", 100.0),
            tx("c", "2023-10-01", "x", -50.0),
        ];
        let asc = sort_transactions(&data, SortField::Amount, SortOrder::Ascending).unwrap();
        assert_eq!(ids(&asc), vec!["c", "b", "a"]);

        let desc = sort_transactions(&data, SortField::Amount, SortOrder::Descending).unwrap();
        assert_eq!(ids(&desc), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_text_fields_ignore_case() {
        let data = vec![
            tx("1", "2023-10-01", "banana", 1.0),
            tx("2", "2023-10-01", "Apple", 1.0),
            tx("3", "2023-10-01", "cherry", 1.0),
        ];
        let asc = sort_transactions(&data, SortField::Remark, SortOrder::Ascending).unwrap();
        assert_eq!(ids(&asc), vec!["2", "1", "3"]);
    }

    #[test]
    fn test_sort_by_type() {
        let data = vec![
            tx("d", "2023-10-01", "x", -1.0),
            tx("c", "2023-10-01", "x", 1.0),
        ];
        let asc = sort_transactions(&data, SortField::Type, SortOrder::Ascending).unwrap();
        assert_eq!(ids(&asc), vec!["c", "d"]);
    }

    #[test]
    fn test_unparsable_date_fails_whole_sort() {
        let data = vec![tx("ok", "2023-10-01", "x", 1.0), tx("bad", "", "x", 1.0)];
        match sort_transactions(&data, SortField::Date, SortOrder::Ascending) {
            Err(CoreError::MalformedData { id, field, .. }) => {
                assert_eq!(id, "bad");
                assert_eq!(field, "date");
            }
            other => panic!("expected malformed data, got {:?}", other),
        }

        // Other fields never look at the date
        assert!(sort_transactions(&data, SortField::Remark, SortOrder::Ascending).is_ok());
    }

    #[test]
    fn test_empty_input() {
        let sorted = sort_transactions(&[], SortField::Date, SortOrder::Descending).unwrap();
        assert!(sorted.is_empty());
    }

    #[test]
    fn test_sort_state_toggle() {
        let state = SortState::default();
        assert_eq!(state, SortState::new(SortField::Date, SortOrder::Descending));

        let flipped = state.toggle(SortField::Date);
        assert_eq!(flipped.order, SortOrder::Ascending);

        let other = flipped.toggle(SortField::Amount);
        assert_eq!(other, SortState::new(SortField::Amount, SortOrder::Ascending));
        assert_eq!(other.toggle(SortField::Amount).order, SortOrder::Descending);
    }
}
