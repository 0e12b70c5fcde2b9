//! Shared Module
//!
//! This module contains types and data structures used across the whole
//! API surface: the board/note domain model, the wire request and response
//! types, the update-notification events pushed to WebSocket clients, and
//! the pure validation functions that gate every store mutation.
//!
//! All types here are plain serializable data with no server dependencies.

/// Board and note domain model plus wire types
pub mod board;

/// Update-notification events
pub mod event;

/// Shared error types
pub mod error;

/// Pure input validation functions
pub mod validation;

/// Re-export commonly used types for convenience
pub use board::{Board, Note, NoteColour, NoteTopic, Position};
pub use error::SharedError;
pub use event::{BoardEvent, BoardEventType};
pub use validation::{
    is_identifier_valid, is_name_valid, is_valid_note, validate_identifier, validate_name,
};
