//! Shared Error Types
//!
//! Error types usable on both sides of the wire. The backend wraps these
//! into its own `ApiError` for HTTP responses.

use thiserror::Error;

/// Errors that can occur while validating or serializing shared types
#[derive(Debug, Error, Clone)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let error = SharedError::validation("BoardName", "too long");
        assert_eq!(
            error.to_string(),
            "Validation error in field 'BoardName': too long"
        );
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let shared: SharedError = err.into();
        assert!(matches!(shared, SharedError::SerializationError { .. }));
    }
}
