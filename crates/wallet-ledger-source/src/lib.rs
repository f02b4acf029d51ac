//! Transaction sources
//!
//! A source hands the ledger loosely-typed candidate records
//! (`serde_json::Value`); shape checking happens in wallet-ledger-core.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub mod error;
pub mod file;
pub mod fixtures;
pub mod retry;

pub use error::SourceError;
pub use file::FileSource;
pub use retry::with_retry;

/// Document encodings understood by [`parse_document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Pick a format from a file extension, defaulting to JSON
    pub fn from_extension(ext: Option<&str>) -> Self {
        match ext.map(|e| e.to_ascii_lowercase()).as_deref() {
            Some("yaml") | Some("yml") => DocumentFormat::Yaml,
            _ => DocumentFormat::Json,
        }
    }
}

/// Parse a document into candidate records.
///
/// Accepts either a top-level list or an object with a `transactions` list.
pub fn parse_document(
    content: &str,
    format: DocumentFormat,
    location: &str,
) -> Result<Vec<Value>, SourceError> {
    let document: Value = match format {
        DocumentFormat::Json => serde_json::from_str(content).map_err(|e| {
            SourceError::InvalidDocument {
                location: location.to_string(),
                message: e.to_string(),
            }
        })?,
        DocumentFormat::Yaml => serde_yaml::from_str(content).map_err(|e| {
            SourceError::InvalidDocument {
                location: location.to_string(),
                message: e.to_string(),
            }
        })?,
    };

    match document {
        Value::Array(records) => Ok(records),
        Value::Object(mut map) => match map.remove("transactions") {
            Some(Value::Array(records)) => Ok(records),
            _ => Err(SourceError::NotASequence {
                location: location.to_string(),
            }),
        },
        _ => Err(SourceError::NotASequence {
            location: location.to_string(),
        }),
    }
}

// ==================== Source Trait ====================

/// Source reference type
pub type SourceRef = Arc<dyn TransactionSourceTrait>;

/// Supplies candidate transaction records to the ledger
#[async_trait]
pub trait TransactionSourceTrait: Send + Sync {
    /// Read every candidate record, in source order
    async fn load(&self) -> Result<Vec<Value>, SourceError>;

    /// Short human-readable description for logs
    fn describe(&self) -> String;
}

/// In-memory source, used for the built-in sample data and in tests
#[derive(Debug, Clone)]
pub struct StaticSource {
    label: String,
    records: Vec<Value>,
}

impl StaticSource {
    pub fn new(label: impl Into<String>, records: Vec<Value>) -> Self {
        Self {
            label: label.into(),
            records,
        }
    }

    /// The nine-record sample wallet
    pub fn sample() -> Self {
        Self::new("built-in sample", fixtures::sample())
    }

    /// The twenty-record demo month
    pub fn extended() -> Self {
        Self::new("built-in extended sample", fixtures::extended())
    }
}

#[async_trait]
impl TransactionSourceTrait for StaticSource {
    async fn load(&self) -> Result<Vec<Value>, SourceError> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("{} ({} records)", self.label, self.records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_array() {
        let records = parse_document(r#"[{"id": "1"}, {"id": "2"}]"#, DocumentFormat::Json, "inline").unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_parse_wrapped_object() {
        let records = parse_document(
            r#"{"transactions": [{"id": "1"}]}"#,
            DocumentFormat::Json,
            "inline",
        )
        .unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_parse_yaml_list() {
        let yaml = "- id: \"1\"\n  amount: -12.5\n- id: \"2\"\n  amount: 40\n";
        let records = parse_document(yaml, DocumentFormat::Yaml, "inline.yaml").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["amount"], serde_json::json!(-12.5));
    }

    #[test]
    fn test_scalar_document_is_not_a_sequence() {
        let err = parse_document("42", DocumentFormat::Json, "inline").unwrap_err();
        assert!(matches!(err, SourceError::NotASequence { .. }));

        let err = parse_document(r#"{"items": []}"#, DocumentFormat::Json, "inline").unwrap_err();
        assert!(matches!(err, SourceError::NotASequence { .. }));
    }

    #[test]
    fn test_broken_json() {
        let err = parse_document("[{", DocumentFormat::Json, "broken.json").unwrap_err();
        match err {
            SourceError::InvalidDocument { location, .. } => assert_eq!(location, "broken.json"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DocumentFormat::from_extension(Some("YML")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_extension(Some("json")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_extension(None), DocumentFormat::Json);
    }

    #[tokio::test]
    async fn test_static_source_loads_sample() {
        let source = StaticSource::sample();
        let records = source.load().await.unwrap();
        assert_eq!(records.len(), 9);
        assert!(source.describe().contains("9 records"));
    }
}
