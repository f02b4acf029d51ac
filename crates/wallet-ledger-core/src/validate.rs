//! Shape validation for candidate transaction records
//!
//! Candidates arrive as `serde_json::Value` from a transaction source or an
//! API request body. `validate` reports every problem with a record at once;
//! `parse_transaction` / `parse_batch` turn valid candidates into typed
//! [`Transaction`]s and `sanitize` is the lossy recovery path for callers
//! that accept best-effort data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::models::Transaction;
use crate::types::TransactionType;

/// A validation problem tied to one named field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field name, namespaced as `transactions[i].field` in batches
    pub field: String,
    /// What is wrong
    pub message: String,
    /// The offending value, when there was one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl FieldError {
    pub fn new(field: &str, message: &str, value: Option<Value>) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            value,
        }
    }
}

/// Outcome of validating one record or a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<FieldError>,
    pub warnings: Vec<FieldError>,
}

impl ValidationReport {
    fn from_parts(errors: Vec<FieldError>, warnings: Vec<FieldError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Turn a failed report into `CoreError::ValidationFailure`
    pub fn into_result(self) -> CoreResult<()> {
        if self.valid {
            Ok(())
        } else {
            Err(CoreError::ValidationFailure {
                errors: self.errors,
            })
        }
    }
}

fn date_pattern() -> &'static regex::Regex {
    static DATE_PATTERN: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    DATE_PATTERN.get_or_init(|| regex::Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap())
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.as_str()),
        _ => None,
    }
}

/// Check one candidate record. All fields are checked; nothing
/// short-circuits.
pub fn validate(candidate: &Value) -> ValidationReport {
    let mut errors = Vec::new();

    let id = candidate.get("id");
    if non_empty_str(id).is_none() {
        errors.push(FieldError::new(
            "id",
            "Transaction ID is required and must be a non-empty string",
            id.cloned(),
        ));
    }

    let date = candidate.get("date");
    match non_empty_str(date) {
        None => errors.push(FieldError::new(
            "date",
            "Date is required and must be a string",
            date.cloned(),
        )),
        Some(raw) if !date_pattern().is_match(raw) => errors.push(FieldError::new(
            "date",
            "Date must be in YYYY-MM-DD format",
            date.cloned(),
        )),
        Some(raw) => {
            if NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_err() {
                errors.push(FieldError::new("date", "Invalid date value", date.cloned()));
            }
        }
    }

    let remark = candidate.get("remark");
    if non_empty_str(remark).is_none() {
        errors.push(FieldError::new(
            "remark",
            "Remark is required and must be a non-empty string",
            remark.cloned(),
        ));
    }

    let amount = candidate.get("amount");
    let finite = amount
        .and_then(Value::as_f64)
        .map_or(false, f64::is_finite);
    if !finite {
        errors.push(FieldError::new(
            "amount",
            "Amount is required and must be a valid number",
            amount.cloned(),
        ));
    }

    let currency = candidate.get("currency");
    if non_empty_str(currency).is_none() {
        errors.push(FieldError::new(
            "currency",
            "Currency is required and must be a non-empty string",
            currency.cloned(),
        ));
    }

    let kind = candidate.get("type");
    if kind.and_then(Value::as_str).and_then(TransactionType::from_exact).is_none() {
        errors.push(FieldError::new(
            "type",
            "Type must be either \"Credit\" or \"Debit\"",
            kind.cloned(),
        ));
    }

    ValidationReport::from_parts(errors, vec![])
}

/// Check every candidate in a batch.
///
/// Errors are namespaced by index. An empty batch and repeated ids are
/// reported as warnings.
pub fn validate_batch(candidates: &[Value]) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if candidates.is_empty() {
        warnings.push(FieldError::new("transactions", "No transactions found", None));
    }

    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (index, candidate) in candidates.iter().enumerate() {
        for error in validate(candidate).errors {
            errors.push(FieldError {
                field: format!("transactions[{}].{}", index, error.field),
                ..error
            });
        }

        if let Some(id) = non_empty_str(candidate.get("id")) {
            if let Some(first) = seen.get(id) {
                warnings.push(FieldError::new(
                    &format!("transactions[{}].id", index),
                    &format!("Duplicate transaction ID (first seen at index {})", first),
                    Some(Value::String(id.to_string())),
                ));
            } else {
                seen.insert(id, index);
            }
        }
    }

    ValidationReport::from_parts(errors, warnings)
}

/// View a raw value as a sequence of candidates
pub fn candidates_from_value(value: &Value) -> CoreResult<&[Value]> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| CoreError::InvalidInput {
            message: "Transactions must be an array".to_string(),
        })
}

/// Validate a raw value that should be a list of candidates
pub fn validate_batch_value(value: &Value) -> CoreResult<ValidationReport> {
    candidates_from_value(value).map(validate_batch)
}

fn loose_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn loose_amount(value: Option<&Value>) -> f64 {
    let amount = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    amount.filter(|a| a.is_finite()).unwrap_or(0.0)
}

/// Coerce a loosely-typed candidate into a best-effort transaction.
///
/// Lossy: missing text fields become empty strings, a missing or
/// non-numeric amount becomes 0 and an unknown type becomes Debit. The
/// result may still fail a date sort.
pub fn sanitize(candidate: &Value) -> Transaction {
    Transaction {
        id: loose_string(candidate.get("id")),
        date: loose_string(candidate.get("date")),
        remark: loose_string(candidate.get("remark")),
        amount: loose_amount(candidate.get("amount")),
        currency: loose_string(candidate.get("currency")),
        transaction_type: candidate
            .get("type")
            .and_then(Value::as_str)
            .and_then(TransactionType::from_exact)
            .unwrap_or(TransactionType::Debit),
    }
}

/// Parse one candidate into a typed transaction, or every field error
pub fn parse_transaction(candidate: &Value) -> CoreResult<Transaction> {
    validate(candidate).into_result()?;
    Ok(sanitize(candidate))
}

/// Parse a raw list of candidates into typed transactions.
///
/// Fails with `InvalidInput` when `value` is not a list and with
/// `ValidationFailure` (carrying every namespaced field error) when any
/// element is invalid.
pub fn parse_batch(value: &Value) -> CoreResult<Vec<Transaction>> {
    let candidates = candidates_from_value(value)?;
    validate_batch(candidates).into_result()?;
    Ok(candidates.iter().map(sanitize).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_candidate() -> Value {
        json!({
            "id": "1",
            "date": "2023-10-01",
            "remark": "Salary",
            "amount": 3000,
            "currency": "USD",
            "type": "Credit"
        })
    }

    fn fields(report: &ValidationReport) -> Vec<&str> {
        report.errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn test_valid_candidate() {
        let report = validate(&valid_candidate());
        assert!(report.valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_collects_every_malformed_field() {
        let report = validate(&json!({
            "id": "",
            "date": "bad",
            "remark": "Lunch",
            "amount": "x",
            "currency": "USD",
            "type": "Debit"
        }));

        assert!(!report.valid);
        assert_eq!(fields(&report), vec!["id", "date", "amount"]);
        assert_eq!(report.errors[1].message, "Date must be in YYYY-MM-DD format");
        assert_eq!(report.errors[2].value, Some(json!("x")));
    }

    #[test]
    fn test_impossible_calendar_date() {
        let mut candidate = valid_candidate();
        candidate["date"] = json!("2023-02-30");
        let report = validate(&candidate);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].message, "Invalid date value");
    }

    #[test]
    fn test_type_must_match_exactly() {
        let mut candidate = valid_candidate();
        candidate["type"] = json!("credit");
        let report = validate(&candidate);
        assert_eq!(fields(&report), vec!["type"]);
    }

    #[test]
    fn test_non_object_fails_every_field() {
        let report = validate(&Value::Null);
        assert_eq!(report.errors.len(), 6);
    }

    #[test]
    fn test_batch_namespaces_errors() {
        let mut bad = valid_candidate();
        bad["currency"] = json!("");
        let report = validate_batch(&[valid_candidate(), bad]);

        assert!(!report.valid);
        assert_eq!(fields(&report), vec!["transactions[1].currency"]);
    }

    #[test]
    fn test_empty_batch_is_a_warning() {
        let report = validate_batch(&[]);
        assert!(report.valid);
        assert!(report.errors.is_empty());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].message, "No transactions found");
    }

    #[test]
    fn test_duplicate_ids_warn() {
        let report = validate_batch(&[valid_candidate(), valid_candidate()]);
        assert!(report.valid);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].field, "transactions[1].id");
    }

    #[test]
    fn test_batch_value_must_be_array() {
        let err = validate_batch_value(&json!({"id": "1"})).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput { .. }));

        let err = parse_batch(&Value::Null).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput { .. }));
    }

    #[test]
    fn test_parse_batch_reports_all_errors() {
        let value = json!([valid_candidate(), {"id": "2"}]);
        match parse_batch(&value) {
            Err(CoreError::ValidationFailure { errors }) => {
                assert_eq!(errors.len(), 5);
                assert!(errors.iter().all(|e| e.field.starts_with("transactions[1].")));
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_transaction() {
        let tx = parse_transaction(&valid_candidate()).unwrap();
        assert_eq!(tx.id, "1");
        assert_eq!(tx.amount, 3000.0);
        assert_eq!(tx.transaction_type, TransactionType::Credit);
    }

    #[test]
    fn test_sanitize_defaults() {
        let tx = sanitize(&json!({ "amount": "abc", "type": "Refund" }));
        assert_eq!(tx.id, "");
        assert_eq!(tx.date, "");
        assert_eq!(tx.remark, "");
        assert_eq!(tx.currency, "");
        assert_eq!(tx.amount, 0.0);
        assert_eq!(tx.transaction_type, TransactionType::Debit);
    }

    #[test]
    fn test_sanitize_coerces_loose_values() {
        let tx = sanitize(&json!({
            "id": 42,
            "date": "2023-10-02",
            "remark": "Groceries",
            "amount": " -150.5 ",
            "currency": "USD",
            "type": "Debit"
        }));
        assert_eq!(tx.id, "42");
        assert_eq!(tx.amount, -150.5);
    }
}
