//! # Error Types
//!
//! Structured error types for chem_core. Each variant carries enough context
//! for a form handler to show an inline message next to the offending field.
//!
//! ## Example
//!
//! ```rust
//! use chem_core::errors::{CalcError, CalcResult};
//!
//! fn validate_volume(volume_l: f64) -> CalcResult<()> {
//!     if volume_l <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "volume_l".to_string(),
//!             value: volume_l.to_string(),
//!             reason: "Volume must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for chem_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A parsed element symbol has no entry in the atomic mass table
    #[error("Unknown element: {symbol}")]
    UnknownElement { symbol: String },

    /// Strict parsing hit a character outside the formula grammar
    #[error("Malformed formula: unexpected '{character}' at position {position}")]
    MalformedFormula { character: char, position: usize },

    /// Strict parsing found a `)` without an open group, or an unclosed `(`
    #[error("Unbalanced parentheses at position {position}")]
    UnbalancedParentheses { position: usize },

    /// An input value is invalid (out of range, wrong sign, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// No conversion path exists between two units
    #[error("Unsupported conversion: {from} -> {to}")]
    UnsupportedConversion { from: String, to: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an UnknownElement error
    pub fn unknown_element(symbol: impl Into<String>) -> Self {
        CalcError::UnknownElement {
            symbol: symbol.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create an UnsupportedConversion error
    pub fn unsupported_conversion(from: impl Into<String>, to: impl Into<String>) -> Self {
        CalcError::UnsupportedConversion {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by the formula text itself (as opposed to
    /// numeric inputs or I/O), which a UI shows as "invalid formula".
    pub fn is_formula_error(&self) -> bool {
        matches!(
            self,
            CalcError::UnknownElement { .. }
                | CalcError::MalformedFormula { .. }
                | CalcError::UnbalancedParentheses { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::UnknownElement { .. } => "UNKNOWN_ELEMENT",
            CalcError::MalformedFormula { .. } => "MALFORMED_FORMULA",
            CalcError::UnbalancedParentheses { .. } => "UNBALANCED_PARENTHESES",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::UnsupportedConversion { .. } => "UNSUPPORTED_CONVERSION",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: e.to_string(),
        }
    }
}
