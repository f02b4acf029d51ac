//! File-backed transaction source (JSON or YAML)

use crate::{parse_document, with_retry, DocumentFormat, SourceError, TransactionSourceTrait};
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Reads candidate records from a single file, or from every file in a
/// directory matching a glob pattern (in sorted path order).
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    pattern: String,
    max_attempts: u32,
    retry_delay: Duration,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pattern: "*.json".to_string(),
            max_attempts: 1,
            retry_delay: Duration::from_millis(0),
        }
    }

    /// Glob applied when the path is a directory
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Retry transient read failures
    pub fn with_retry(mut self, max_attempts: u32, retry_delay: Duration) -> Self {
        self.max_attempts = max_attempts;
        self.retry_delay = retry_delay;
        self
    }

    /// Resolve the files this source will read
    pub fn files(&self) -> Result<Vec<PathBuf>, SourceError> {
        if self.path.is_file() {
            return Ok(vec![self.path.clone()]);
        }
        if !self.path.is_dir() {
            return Err(SourceError::NotFound {
                path: self.path.display().to_string(),
            });
        }

        let pattern = self.path.join(&self.pattern);
        let pattern_str = pattern.to_string_lossy().to_string();
        let entries = glob::glob(&pattern_str).map_err(|e| SourceError::Pattern {
            pattern: pattern_str.clone(),
            message: e.to_string(),
        })?;

        let mut files: Vec<PathBuf> = entries.flatten().filter(|p| p.is_file()).collect();
        files.sort();
        Ok(files)
    }

    async fn read_file(&self, file: &Path) -> Result<Vec<Value>, SourceError> {
        let location = file.display().to_string();
        let content = with_retry(
            self.max_attempts,
            self.retry_delay,
            SourceError::is_transient,
            || {
                let path = location.clone();
                async move {
                    tokio::fs::read_to_string(file)
                        .await
                        .map_err(|source| SourceError::Io { path, source })
                }
            },
        )
        .await?;

        let format = DocumentFormat::from_extension(file.extension().and_then(|e| e.to_str()));
        parse_document(&content, format, &location)
    }
}

#[async_trait]
impl TransactionSourceTrait for FileSource {
    async fn load(&self) -> Result<Vec<Value>, SourceError> {
        let files = self.files()?;
        if files.is_empty() {
            log::warn!(
                target: "wallet_ledger::source",
                "no files matching {} under {}",
                self.pattern,
                self.path.display()
            );
        }

        let mut records = Vec::new();
        for file in files {
            let batch = self.read_file(&file).await?;
            log::debug!(
                target: "wallet_ledger::source",
                "read {} records from {}",
                batch.len(),
                file.display()
            );
            records.extend(batch);
        }
        Ok(records)
    }

    fn describe(&self) -> String {
        if self.path.is_dir() {
            format!("{} ({})", self.path.display(), self.pattern)
        } else {
            self.path.display().to_string()
        }
    }
}
