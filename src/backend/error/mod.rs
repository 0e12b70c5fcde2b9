//! Backend Error Types
//!
//! HTTP-facing error handling for the board API.

/// Error enum and status mapping
pub mod types;

/// Conversion into HTTP responses
pub mod conversion;

pub use types::ApiError;
