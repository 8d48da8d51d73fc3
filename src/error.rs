//! Custom error types for spendscope
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for spendscope operations
#[derive(Error, Debug)]
pub enum SpendscopeError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Validation errors for caller-supplied values
    #[error("Validation error: {0}")]
    Validation(String),

    /// A period key that was not produced by the period enumerator
    #[error("Malformed {granularity} period key: '{key}'")]
    MalformedPeriodKey {
        key: String,
        granularity: &'static str,
    },

    /// A custom range whose start falls after its end
    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// A selection that does not fit the requested mode
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl SpendscopeError {
    /// Create a malformed key error for a monthly key
    pub fn malformed_month_key(key: impl Into<String>) -> Self {
        Self::MalformedPeriodKey {
            key: key.into(),
            granularity: "monthly",
        }
    }

    /// Create a malformed key error for a weekly key
    pub fn malformed_week_key(key: impl Into<String>) -> Self {
        Self::MalformedPeriodKey {
            key: key.into(),
            granularity: "weekly",
        }
    }

    /// Check if this is a malformed period key error
    pub fn is_malformed_key(&self) -> bool {
        matches!(self, Self::MalformedPeriodKey { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::InvalidRange { .. } | Self::InvalidSelection(_)
        )
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for SpendscopeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SpendscopeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for SpendscopeError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

impl From<csv::Error> for SpendscopeError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for spendscope operations
pub type SpendscopeResult<T> = Result<T, SpendscopeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SpendscopeError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_malformed_key_error() {
        let err = SpendscopeError::malformed_month_key("2024/07");
        assert_eq!(err.to_string(), "Malformed monthly period key: '2024/07'");
        assert!(err.is_malformed_key());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_invalid_range_error() {
        let err = SpendscopeError::InvalidRange {
            start: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid date range: 2024-02-01 is after 2024-01-01"
        );
        assert!(err.is_validation());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SpendscopeError = io_err.into();
        assert!(matches!(err, SpendscopeError::Io(_)));
    }
}
