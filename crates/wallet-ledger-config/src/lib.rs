//! Configuration management for wallet-ledger
//!
//! This module handles loading, validation, and management of
//! wallet-ledger configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::ConfigError;

/// Sort field names accepted by `table.default_sort_field`
pub const SORT_FIELDS: [&str; 5] = ["date", "remark", "amount", "currency", "type"];

/// Sort order names accepted by `table.default_sort_order`
pub const SORT_ORDERS: [&str; 4] = ["asc", "desc", "ascending", "descending"];

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

/// What to do with records that fail validation while loading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidRecordPolicy {
    /// Refuse the whole load
    Reject,
    /// Coerce each invalid record into a best-effort transaction
    Sanitize,
}

impl Default for InvalidRecordPolicy {
    fn default() -> Self {
        InvalidRecordPolicy::Reject
    }
}

impl std::str::FromStr for InvalidRecordPolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reject" => Ok(InvalidRecordPolicy::Reject),
            "sanitize" => Ok(InvalidRecordPolicy::Sanitize),
            _ => Err(format!("Invalid record policy: {}", s)),
        }
    }
}

impl std::fmt::Display for InvalidRecordPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidRecordPolicy::Reject => write!(f, "reject"),
            InvalidRecordPolicy::Sanitize => write!(f, "sanitize"),
        }
    }
}

/// Transaction data settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Data file or directory. Empty means the built-in sample data.
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    /// Glob pattern used when `path` is a directory
    #[serde(default = "default_pattern")]
    pub pattern: String,
    /// Handling of records that fail validation
    #[serde(default)]
    pub invalid_records: InvalidRecordPolicy,
    /// Read attempts per file before giving up
    #[serde(default = "default_load_retries")]
    pub load_retries: u32,
    /// Base delay between read attempts, multiplied by the attempt number
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            pattern: default_pattern(),
            invalid_records: InvalidRecordPolicy::default(),
            load_retries: default_load_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::new()
}

fn default_pattern() -> String {
    "*.json".to_string()
}

fn default_load_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    200
}

/// Pagination settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Records per page for lists
    #[serde(default = "default_records_per_page")]
    pub records_per_page: usize,
    /// Page sizes a client may request
    #[serde(default = "default_page_size_options")]
    pub page_size_options: Vec<usize>,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            records_per_page: default_records_per_page(),
            page_size_options: default_page_size_options(),
        }
    }
}

fn default_records_per_page() -> usize {
    10
}

fn default_page_size_options() -> Vec<usize> {
    vec![10, 25, 50, 100]
}

/// Transaction table settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    /// Column sorted on first view
    #[serde(default = "default_sort_field")]
    pub default_sort_field: String,
    /// Direction of the first sort ("asc" or "desc")
    #[serde(default = "default_sort_order")]
    pub default_sort_order: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            default_sort_field: default_sort_field(),
            default_sort_order: default_sort_order(),
        }
    }
}

fn default_sort_field() -> String {
    "date".to_string()
}

fn default_sort_order() -> String {
    "desc".to_string()
}

/// Dashboard card settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Reference amount the summary cards express percentages against
    #[serde(default = "default_baseline")]
    pub baseline: f64,
    /// Number of recent transactions shown on the dashboard
    #[serde(default = "default_recent_count")]
    pub recent_count: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            baseline: default_baseline(),
            recent_count: default_recent_count(),
        }
    }
}

fn default_baseline() -> f64 {
    10_000.0
}

fn default_recent_count() -> usize {
    10
}

/// Currency and number formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Default currency
    #[serde(default = "default_currency")]
    pub default_currency: String,
    /// Symbol printed next to formatted amounts
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Number of decimal places
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
    /// Thousands separator
    #[serde(default = "default_thousands_sep")]
    pub thousands_separator: String,
    /// Decimal separator
    #[serde(default = "default_decimal_sep")]
    pub decimal_separator: String,
    /// Currency symbol position ("before" or "after")
    #[serde(default)]
    pub symbol_position: SymbolPosition,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            default_currency: default_currency(),
            symbol: default_symbol(),
            decimal_places: default_decimal_places(),
            thousands_separator: default_thousands_sep(),
            decimal_separator: default_decimal_sep(),
            symbol_position: SymbolPosition::Before,
        }
    }
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_symbol() -> String {
    "$".to_string()
}

fn default_decimal_places() -> u32 {
    2
}

fn default_thousands_sep() -> String {
    ",".to_string()
}

fn default_decimal_sep() -> String {
    ".".to_string()
}

/// Currency symbol position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    Before,
    After,
}

impl Default for SymbolPosition {
    fn default() -> Self {
        SymbolPosition::Before
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Transaction data settings
    #[serde(default)]
    pub data: DataConfig,
    /// Pagination settings
    #[serde(default)]
    pub pagination: PaginationConfig,
    /// Table settings
    #[serde(default)]
    pub table: TableConfig,
    /// Dashboard settings
    #[serde(default)]
    pub dashboard: DashboardConfig,
    /// Currency settings
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            message: e.to_string(),
        })?;

        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml {
            message: e.to_string(),
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(invalid("server.port", "Port must be greater than 0"));
        }

        if self.pagination.records_per_page == 0 {
            return Err(invalid(
                "pagination.records_per_page",
                "Records per page must be greater than 0",
            ));
        }

        if self.pagination.page_size_options.iter().any(|&size| size == 0) {
            return Err(invalid(
                "pagination.page_size_options",
                "Page size options must all be greater than 0",
            ));
        }

        if !self.pagination.page_size_options.is_empty()
            && !self
                .pagination
                .page_size_options
                .contains(&self.pagination.records_per_page)
        {
            return Err(invalid(
                "pagination.records_per_page",
                "Records per page must be one of pagination.page_size_options",
            ));
        }

        let field = self.table.default_sort_field.to_lowercase();
        if !SORT_FIELDS.contains(&field.as_str()) {
            return Err(invalid(
                "table.default_sort_field",
                &format!("Sort field must be one of: {}", SORT_FIELDS.join(", ")),
            ));
        }

        let order = self.table.default_sort_order.to_lowercase();
        if !SORT_ORDERS.contains(&order.as_str()) {
            return Err(invalid(
                "table.default_sort_order",
                "Sort order must be \"asc\" or \"desc\"",
            ));
        }

        if !self.dashboard.baseline.is_finite() || self.dashboard.baseline <= 0.0 {
            return Err(invalid(
                "dashboard.baseline",
                "Baseline must be a positive number",
            ));
        }

        if self.currency.decimal_places > 10 {
            return Err(invalid(
                "currency.decimal_places",
                "Decimal places must be between 0 and 10",
            ));
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Data location, or `None` when the built-in sample data should be served
    pub fn data_path(&self) -> Option<&Path> {
        if self.data.path.as_os_str().is_empty() {
            None
        } else {
            Some(self.data.path.as_path())
        }
    }

    /// Check whether a requested page size is allowed
    pub fn is_page_size_allowed(&self, per_page: usize) -> bool {
        if self.pagination.page_size_options.is_empty() {
            per_page > 0
        } else {
            self.pagination.page_size_options.contains(&per_page)
        }
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigErrorCode;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.pagination.records_per_page, 10);
        assert_eq!(config.table.default_sort_field, "date");
        assert_eq!(config.table.default_sort_order, "desc");
        assert_eq!(config.data.invalid_records, InvalidRecordPolicy::Reject);
    }

    #[test]
    fn test_bundled_template_parses() {
        let config = Config::from_yaml(Config::generate_default()).unwrap();
        assert_eq!(config.currency.default_currency, "USD");
        assert_eq!(config.pagination.page_size_options, vec![10, 25, 50, 100]);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = Config::from_yaml("server:\n  port: 9000\ndata:\n  invalid_records: sanitize\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.data.invalid_records, InvalidRecordPolicy::Sanitize);
        assert_eq!(config.dashboard.recent_count, 10);
    }

    #[test]
    fn test_rejects_unknown_sort_field() {
        let err = Config::from_yaml("table:\n  default_sort_field: payee\n").unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::InvalidValue);
        assert!(err.to_string().contains("table.default_sort_field"));
    }

    #[test]
    fn test_rejects_page_size_outside_options() {
        let err = Config::from_yaml("pagination:\n  records_per_page: 7\n").unwrap_err();
        assert!(err.to_string().contains("pagination.records_per_page"));
    }

    #[test]
    fn test_rejects_non_positive_baseline() {
        let err = Config::from_yaml("dashboard:\n  baseline: 0\n").unwrap_err();
        assert!(err.to_string().contains("dashboard.baseline"));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = Config::from_yaml("server: [unclosed").unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::InvalidYaml);
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load("/definitely/not/here/config.yaml").unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::FileNotFound);
    }

    #[test]
    fn test_empty_data_path_means_builtin() {
        let mut config = Config::default();
        assert!(config.data_path().is_none());
        config.data.path = PathBuf::from("./data");
        assert_eq!(config.data_path(), Some(Path::new("./data")));
    }

    #[test]
    fn test_bundled_template_serves_builtin_sample() {
        let config = Config::from_yaml(Config::generate_default()).unwrap();
        assert!(config.data_path().is_none());
        let config = Config::from_yaml("server:\n  port: 9000\n").unwrap();
        assert!(config.data_path().is_none());
    }

    #[test]
    fn test_page_size_allowed() {
        let config = Config::default();
        assert!(config.is_page_size_allowed(25));
        assert!(!config.is_page_size_allowed(30));
    }

    #[test]
    fn test_invalid_record_policy_from_str() {
        assert_eq!("Sanitize".parse::<InvalidRecordPolicy>(), Ok(InvalidRecordPolicy::Sanitize));
        assert!("drop".parse::<InvalidRecordPolicy>().is_err());
    }
}
