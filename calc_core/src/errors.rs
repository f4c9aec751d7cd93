//! # Error Types
//!
//! Structured error types for calc_core. The calculation engine itself has
//! exactly one failure mode, [`CalcError::MissingOrInvalidDimension`]; the
//! remaining variants belong to catalog configuration and report file I/O.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn require_length(raw: &str) -> CalcResult<f64> {
//!     raw.trim().parse::<f64>().map_err(|_| {
//!         CalcError::invalid_dimension("length_cm", raw, "Not a number")
//!     })
//! }
//!
//! assert_eq!(require_length("abc").unwrap_err().error_code(), "MISSING_OR_INVALID_DIMENSION");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calc_core operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A package dimension is absent, empty, not a number, or not positive
    #[error("Missing or invalid dimension '{field}': '{value}' - {reason}")]
    MissingOrInvalidDimension {
        field: String,
        value: String,
        reason: String,
    },

    /// The material / damage-level catalog violates an invariant
    #[error("Invalid catalog: {reason}")]
    InvalidCatalog { reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON or TOML serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create a MissingOrInvalidDimension error
    pub fn invalid_dimension(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::MissingOrInvalidDimension {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidCatalog error
    pub fn invalid_catalog(reason: impl Into<String>) -> Self {
        CalcError::InvalidCatalog {
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// True when the user can fix the problem by re-entering input
    pub fn is_input_error(&self) -> bool {
        matches!(self, CalcError::MissingOrInvalidDimension { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::MissingOrInvalidDimension { .. } => "MISSING_OR_INVALID_DIMENSION",
            CalcError::InvalidCatalog { .. } => "INVALID_CATALOG",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_dimension("width_cm", "abc", "Not a number");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"MissingOrInvalidDimension\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CalcError::invalid_dimension("height_cm", "", "Empty").error_code(),
            "MISSING_OR_INVALID_DIMENSION"
        );
        assert_eq!(CalcError::invalid_catalog("empty").error_code(), "INVALID_CATALOG");
        assert_eq!(CalcError::serialization("bad").error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_only_dimension_errors_are_input_errors() {
        assert!(CalcError::invalid_dimension("length_cm", "-1", "Must be positive").is_input_error());
        assert!(!CalcError::file_error("write", "/tmp/x", "denied").is_input_error());
    }

    #[test]
    fn test_display_names_field() {
        let error = CalcError::invalid_dimension("length_cm", "", "Value is empty");
        assert_eq!(
            error.to_string(),
            "Missing or invalid dimension 'length_cm': '' - Value is empty"
        );
    }
}
