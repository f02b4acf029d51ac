//! Error types for wallet-ledger-source

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Transaction data not found: {path}")]
    NotFound { path: String },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid document at {location}: {message}")]
    InvalidDocument { location: String, message: String },

    #[error("Expected a list of transactions at {location}")]
    NotASequence { location: String },

    #[error("Invalid file pattern {pattern}: {message}")]
    Pattern { pattern: String, message: String },
}

impl SourceError {
    /// Whether reading again could plausibly succeed
    pub fn is_transient(&self) -> bool {
        match self {
            SourceError::Io { source, .. } => source.kind() != io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
