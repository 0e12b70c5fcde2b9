//! Document Store Trait
//!
//! The handlers talk to the board table exclusively through this trait, so
//! the store stays an external collaborator: tests can substitute a
//! scripted failing store, and a managed database client can slot in
//! without touching the handlers.
//!
//! # Atomicity
//!
//! The note-level operations (`append_note`, `update_note_at`,
//! `remove_note_at`) are single atomic document updates. Handlers never
//! read a note list, mutate a local copy and write the whole list back;
//! that read-modify-write pattern loses concurrent writes on the same
//! board.

use async_trait::async_trait;
use thiserror::Error;

use crate::shared::board::{Board, Note, NoteTopic, QueryEnvelope};

/// Failure of the underlying document database
///
/// Store errors are never surfaced verbatim to API callers; handlers map
/// them to a generic 5xx response and log the detail.
#[derive(Debug, Error, Clone)]
pub enum StoreError {
    /// The store request itself failed (connectivity, throttling, ...)
    #[error("Store request failed: {message}")]
    RequestFailed {
        /// Human-readable error message
        message: String,
    },
}

impl StoreError {
    /// Create a new request failure
    pub fn request(message: impl Into<String>) -> Self {
        Self::RequestFailed {
            message: message.into(),
        }
    }
}

/// Outcome of a conditional note append
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// The note was appended
    Appended,
    /// No board with that identifier exists
    MissingBoard,
    /// The board already holds a note with that id
    DuplicateNote,
}

/// Operations the board handlers need from the document database
///
/// Conditional operations return `Ok(true)` when the targeted document (or
/// note slot) existed and was updated, `Ok(false)` when the condition
/// failed because the target was absent. `Err` is reserved for store
/// failures.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Full scan of the board table, no pagination
    async fn scan_boards(&self) -> Result<Vec<Board>, StoreError>;

    /// Exact-match lookup through the board-name index
    async fn query_boards_by_name(&self, name: &str) -> Result<QueryEnvelope<Board>, StoreError>;

    /// Key lookup by board identifier
    async fn get_board(&self, board_id: &str) -> Result<Option<Board>, StoreError>;

    /// Insert or replace a board document
    async fn put_board(&self, board: Board) -> Result<(), StoreError>;

    /// Atomically set the board name, conditioned on the key existing
    async fn update_board_name(&self, board_id: &str, name: &str) -> Result<bool, StoreError>;

    /// Delete a board document by identifier
    async fn delete_board(&self, board_id: &str) -> Result<bool, StoreError>;

    /// Atomically append a note to a board's note list, conditioned on no
    /// note with the same id being present
    async fn append_note(&self, board_id: &str, note: Note) -> Result<AppendOutcome, StoreError>;

    /// Atomically replace the topic of the note at `index`, conditioned on
    /// the note id at that index still matching `note_id`
    async fn update_note_at(
        &self,
        board_id: &str,
        index: usize,
        note_id: &str,
        topic: NoteTopic,
    ) -> Result<bool, StoreError>;

    /// Atomically remove the note at `index`, conditioned on the note id
    /// at that index still matching `note_id`
    async fn remove_note_at(
        &self,
        board_id: &str,
        index: usize,
        note_id: &str,
    ) -> Result<bool, StoreError>;
}
