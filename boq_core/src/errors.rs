//! # Error Types
//!
//! Structured error types for boq_core. Every failure is local to a single
//! estimate or document operation and is reported back to the caller; nothing
//! here is retried.
//!
//! ## Example
//!
//! ```rust
//! use boq_core::errors::{CalcError, CalcResult};
//!
//! fn validate_length(length_m: f64) -> CalcResult<()> {
//!     if length_m <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "length_m",
//!             length_m.to_string(),
//!             "Length must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_length(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for boq_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for estimation and document operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (non-positive dimension, empty floor, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A construction method was selected that has no take-off formula
    #[error("Unsupported method for {stage}: '{method}' has no quantity take-off rules")]
    UnsupportedMethod { stage: String, method: String },

    /// A price book does not carry a price for a material
    #[error("Material not found in price book: {material}")]
    MaterialNotFound { material: String },

    /// No built-in plan template with this name
    #[error("Plan template not found: {name}")]
    TemplateNotFound { name: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON/TOML serialization or parsing error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Report rendering failed
    #[error("Render failed: {reason}")]
    RenderFailed { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnsupportedMethod error
    pub fn unsupported_method(stage: impl Into<String>, method: impl Into<String>) -> Self {
        CalcError::UnsupportedMethod {
            stage: stage.into(),
            method: method.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material: impl Into<String>) -> Self {
        CalcError::MaterialNotFound {
            material: material.into(),
        }
    }

    /// Create a TemplateNotFound error
    pub fn template_not_found(name: impl Into<String>) -> Self {
        CalcError::TemplateNotFound { name: name.into() }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(path: impl Into<String>, locked_by: impl Into<String>, locked_at: impl Into<String>) -> Self {
        CalcError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Create a RenderFailed error
    pub fn render_failed(reason: impl Into<String>) -> Self {
        CalcError::RenderFailed {
            reason: reason.into(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::UnsupportedMethod { .. } => "UNSUPPORTED_METHOD",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::TemplateNotFound { .. } => "TEMPLATE_NOT_FOUND",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::FileLocked { .. } => "FILE_LOCKED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
            CalcError::RenderFailed { .. } => "RENDER_FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::unsupported_method("Foundation & Groundwork", "pile");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"UnsupportedMethod\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::material_not_found("cement_50kg").error_code(), "MATERIAL_NOT_FOUND");
        assert_eq!(CalcError::unsupported_method("Roofing", "tiles").error_code(), "UNSUPPORTED_METHOD");
        assert_eq!(CalcError::template_not_found("villa").error_code(), "TEMPLATE_NOT_FOUND");
    }

    #[test]
    fn test_only_locks_are_recoverable() {
        assert!(CalcError::file_locked("a.boq", "someone", "now").is_recoverable());
        assert!(!CalcError::invalid_input("floors", "[]", "empty").is_recoverable());
    }

    #[test]
    fn test_display_names_the_method() {
        let msg = CalcError::unsupported_method("Blockwork & Walling", "brick").to_string();
        assert!(msg.contains("brick"));
        assert!(msg.contains("Blockwork"));
    }
}
