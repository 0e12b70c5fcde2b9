//! API Error Types
//!
//! This module defines the error type returned by the board API handlers.
//! Every outcome class carries an explicit status code: invalid input is
//! 400, a missing resource is 404, a duplicate note id is 409, a failing
//! store is 502. Invalid input and not-found are never conflated.
//!
//! # Error Categories
//!
//! - `Validation` - malformed identifier, name or note payload; always
//!   client fault.
//! - `NotFound` - correctly-shaped lookup hit nothing.
//! - `Conflict` - note id already present on the target board.
//! - `Store` - the document database itself errored. The raw detail is
//!   logged, never sent to the caller.

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::store::StoreError;
use crate::shared::SharedError;

/// Errors a board API handler can answer with
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input failed validation before any store access
    #[error("Invalid {field}: {message}")]
    Validation {
        /// The offending input field
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// The requested resource does not exist
    #[error("{resource} not found")]
    NotFound {
        /// What was looked up (board, note, ...)
        resource: String,
    },

    /// The request conflicts with existing state
    #[error("{message}")]
    Conflict {
        /// Human-readable error message
        message: String,
    },

    /// The document store failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Shared-layer error
    #[error(transparent)]
    Shared(#[from] SharedError),

    /// Serialization failure while building a response
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ApiError {
    /// Create a validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// The status code this error answers with
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Store(_) => StatusCode::BAD_GATEWAY,
            Self::Shared(SharedError::ValidationError { .. }) => StatusCode::BAD_REQUEST,
            Self::Shared(SharedError::SerializationError { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message sent to the caller
    ///
    /// Store failures answer with a generic message; the underlying error
    /// is only logged.
    pub fn public_message(&self) -> String {
        match self {
            Self::Store(_) => "Document store request failed".to_string(),
            other => other.to_string(),
        }
    }
}
