//! Error types for wallet-ledger-core
//!
//! Every failure of the data-processing pipeline is one of three kinds:
//! the input is not a sequence (`InvalidInput`), a record cannot be read
//! the way an operation needs it (`MalformedData`), or a batch of candidate
//! records failed shape checks (`ValidationFailure`). The remaining variants
//! cover loading and lookup around the pipeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wallet_ledger_source::SourceError;

use crate::validate::FieldError;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Argument is not a proper sequence of records
    InvalidInput,
    /// A record field cannot be interpreted as the operation requires
    MalformedData,
    /// Candidate records failed shape validation
    ValidationFailure,
    /// Ledger not loaded
    NotLoaded,
    /// Transaction not found
    TransactionNotFound,
    /// Transaction source could not be read
    SourceError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::InvalidInput => write!(f, "INVALID_INPUT"),
            ErrorCode::MalformedData => write!(f, "MALFORMED_DATA"),
            ErrorCode::ValidationFailure => write!(f, "VALIDATION_FAILURE"),
            ErrorCode::NotLoaded => write!(f, "NOT_LOADED"),
            ErrorCode::TransactionNotFound => write!(f, "TRANSACTION_NOT_FOUND"),
            ErrorCode::SourceError => write!(f, "SOURCE_ERROR"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    /// Whether repeating the same request is safe and may succeed
    pub retryable: bool,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
            retryable: false,
        }
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }

    /// Mark the failed request as safe to repeat
    pub fn retryable(mut self, retryable: bool) -> Self {
        self.retryable = retryable;
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Informational
    Info,
    /// Warning - operation may be affected
    Warning,
    /// Error - operation failed
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Main error type for wallet-ledger-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Malformed {field} on transaction {id}: {message}")]
    MalformedData {
        id: String,
        field: String,
        value: String,
        message: String,
    },

    #[error("Validation failed with {} field error(s)", .errors.len())]
    ValidationFailure { errors: Vec<FieldError> },

    #[error("Ledger not loaded")]
    NotLoaded,

    #[error("Transaction not found: {id}")]
    TransactionNotFound { id: String },

    #[error("Source error: {message}")]
    Source { message: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::InvalidInput { .. } => ErrorCode::InvalidInput,
            CoreError::MalformedData { .. } => ErrorCode::MalformedData,
            CoreError::ValidationFailure { .. } => ErrorCode::ValidationFailure,
            CoreError::NotLoaded => ErrorCode::NotLoaded,
            CoreError::TransactionNotFound { .. } => ErrorCode::TransactionNotFound,
            CoreError::Source { .. } => ErrorCode::SourceError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::InvalidInput { .. } => ErrorSeverity::Error,
            CoreError::MalformedData { .. } => ErrorSeverity::Error,
            CoreError::ValidationFailure { .. } => ErrorSeverity::Warning,
            CoreError::NotLoaded => ErrorSeverity::Warning,
            CoreError::TransactionNotFound { .. } => ErrorSeverity::Info,
            CoreError::Source { .. } => ErrorSeverity::Error,
        }
    }

    /// Every ledger operation is idempotent, so repeating one is always safe
    pub fn is_retryable(&self) -> bool {
        true
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details =
            ErrorDetails::new(self.code(), self.to_string()).retryable(self.is_retryable());

        match self {
            CoreError::InvalidInput { .. } => {
                details = details.with_suggestion(
                    "Send the transactions as a JSON array.".to_string(),
                );
            }
            CoreError::MalformedData { id, field, value, .. } => {
                details = details
                    .with_detail(serde_json::json!({ "id": id, "field": field, "value": value }))
                    .with_suggestion(format!(
                        "Correct the {} of transaction '{}' or sort by another column.",
                        field, id
                    ));
            }
            CoreError::ValidationFailure { errors } => {
                details = details
                    .with_detail(serde_json::json!({ "errors": errors }))
                    .with_suggestion(
                        "Fix the listed fields and submit the records again.".to_string(),
                    );
            }
            CoreError::NotLoaded => {
                details = details.with_suggestion(
                    "Reload the ledger with POST /api/reload.".to_string(),
                );
            }
            CoreError::TransactionNotFound { .. } => {
                details = details.with_suggestion(
                    "Use the /api/transactions endpoint to list all transactions.".to_string(),
                );
            }
            CoreError::Source { .. } => {
                details = details
                    .with_suggestion("Check that the data file exists and is readable.".to_string())
                    .with_suggestion("Check data.path in the configuration.".to_string());
            }
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl From<SourceError> for CoreError {
    fn from(error: SourceError) -> Self {
        CoreError::Source {
            message: error.to_string(),
        }
    }
}

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed
    pub operation: String,
    /// Additional context data
    pub data: serde_json::Value,
}

impl ErrorContext {
    /// Create a new error context
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            data: serde_json::json!({}),
        }
    }

    /// Add context data
    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data[key] = value;
        self
    }
}

/// Diagnostic sink for problems that do not fail an operation
pub trait ErrorLogger {
    /// Log an error
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
    /// Log a warning
    fn log_warning(&self, message: &str, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        let level = match error.severity() {
            ErrorSeverity::Info => log::Level::Info,
            ErrorSeverity::Warning => log::Level::Warn,
            ErrorSeverity::Error => log::Level::Error,
        };
        log::log!(
            target: "wallet_ledger::error",
            level,
            "[{}] {} - operation: {} - context: {}",
            error.code(),
            error,
            context.operation,
            context.data
        );
    }

    fn log_warning(&self, message: &str, context: &ErrorContext) {
        log::warn!(
            target: "wallet_ledger::error",
            "{} - operation: {} - context: {}",
            message,
            context.operation,
            context.data
        );
    }
}

// ==================== Tests ====================
