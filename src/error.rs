//! Custom error types for tally
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for tally operations
#[derive(Error, Debug)]
pub enum TallyError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Rejected user input: bad dates, months, amounts or empty fields
    #[error("Validation error: {0}")]
    Validation(String),

    /// Persistence failures (unreadable or corrupt ledger, failed writes, closed store)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors (CSV files, chart images)
    #[error("Export error: {0}")]
    Export(String),
}

impl TallyError {
    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a storage error
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

impl From<std::io::Error> for TallyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TallyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for TallyError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for tally operations
pub type TallyResult<T> = Result<T, TallyError>;
