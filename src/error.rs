//! Custom error types for StepUp
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for StepUp operations
#[derive(Error, Debug)]
pub enum SalesError {
    /// A date range whose start falls after its end
    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange { start: String, end: String },

    /// Malformed period label or date text
    #[error("Parse error: {0}")]
    Parse(String),

    /// Distributing an amount across zero days
    #[error("Cannot distribute an amount across an empty date range")]
    EmptyRange,

    /// An active target already starts on the same date
    #[error("An active target already starts on {start}")]
    DuplicateTarget { start: String },

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl SalesError {
    /// Create an "invalid range" error from any displayable bounds
    pub fn invalid_range(start: impl ToString, end: impl ToString) -> Self {
        Self::InvalidRange {
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    /// Create a "not found" error for targets
    pub fn target_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Target",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for sales records
    pub fn record_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Record",
            identifier: identifier.into(),
        }
    }

    /// Create an error for amounts whose sum does not fit in a `u64`
    pub fn amount_overflow() -> Self {
        Self::Validation("Amount total is too large".into())
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a duplicate target conflict
    ///
    /// Callers offer an explicit overwrite when this is true.
    pub fn is_duplicate_target(&self) -> bool {
        matches!(self, Self::DuplicateTarget { .. })
    }

    /// Check if this error means the user picked an unusable period
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

impl From<std::io::Error> for SalesError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SalesError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for SalesError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for StepUp operations
pub type SalesResult<T> = Result<T, SalesError>;
