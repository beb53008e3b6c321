//! Custom error types for budget-insight
//!
//! This module defines the error hierarchy for the library using thiserror
//! for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for budget-insight operations
#[derive(Error, Debug)]
pub enum InsightError {
    /// The input file does not exist
    #[error("File '{}' not found!", .0.display())]
    SourceNotFound(PathBuf),

    /// A required column is absent from the header row
    #[error("Malformed input: missing required column '{0}'")]
    MissingColumn(&'static str),

    /// A data row could not be parsed
    #[error("Malformed input at row {row}: {message}")]
    MalformedInput { row: usize, message: String },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Chart rendering or writing errors
    #[error("Chart error: {0}")]
    Chart(String),

    /// Validation errors for user-supplied values
    #[error("Validation error: {0}")]
    Validation(String),
}

impl InsightError {
    /// Create a "malformed input" error for a 1-based data row
    pub fn malformed(row: usize, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            row,
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for InsightError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for InsightError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for InsightError {
    fn from(err: csv::Error) -> Self {
        let row = err
            .position()
            .map(|pos| pos.record() as usize)
            .unwrap_or_default();
        Self::malformed(row, err.to_string())
    }
}

/// Result type alias for budget-insight operations
pub type InsightResult<T> = Result<T, InsightError>;
