//! Board and Note Domain Model
//!
//! Defines the board/note data structures stored in the document store and
//! the request/response types used on the wire. Field casing on the wire
//! matches the original board API (`BoardId`, `BoardName`, `noteId`,
//! `singleNote`, `dateCreated`), so existing clients keep working.
//!
//! # Ownership
//!
//! A board exclusively owns its note list: notes have no existence outside
//! their board document. Note ids are unique within a board, not globally.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Colour of a sticky note
///
/// The four colours the board UI knows how to render. Serialized in
/// lowercase (`"white"`, `"yellow"`, `"blue"`, `"green"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteColour {
    White,
    Yellow,
    Blue,
    Green,
}

/// Position of a note on the board, in board coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Position {
    pub left: f64,
    pub top: f64,
}

/// The visible content of a note: colour, position and text
///
/// `deny_unknown_fields` keeps typed deserialization in agreement with
/// [`crate::shared::validation::is_valid_note`]: a payload with extra keys
/// is rejected by both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoteTopic {
    pub colour: NoteColour,
    pub position: Position,
    pub text: String,
}

/// A single sticky note as stored inside its board document
///
/// `note_id` is caller-supplied; `date_created` is stamped server-side in
/// epoch milliseconds and serialized as `dateCreated`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub note_id: String,
    pub topic: NoteTopic,
    #[serde(rename = "dateCreated")]
    pub date_created: i64,
}

impl Note {
    /// Create a new note with the current timestamp
    pub fn new(note_id: impl Into<String>, topic: NoteTopic) -> Self {
        Self {
            note_id: note_id.into(),
            topic,
            date_created: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// A board document: identifier, display name and its ordered note list
///
/// The identifier is assigned at creation and immutable; it uniquely
/// selects at most one board. The name is mutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    #[serde(rename = "BoardId")]
    pub id: String,
    #[serde(rename = "BoardName")]
    pub name: String,
    pub notes: Vec<Note>,
}

impl Board {
    /// Create a new board with a fresh 36-character identifier and an
    /// empty note list
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            notes: Vec::new(),
        }
    }

    /// Index of the note with the given id, if present
    pub fn note_index(&self, note_id: &str) -> Option<usize> {
        self.notes.iter().position(|n| n.note_id == note_id)
    }
}

/// Query result envelope, as returned by the document store's name index
///
/// Get-board-by-name returns this envelope unwrapped, items and count,
/// which is what the original API did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryEnvelope<T> {
    #[serde(rename = "Items")]
    pub items: Vec<T>,
    #[serde(rename = "Count")]
    pub count: usize,
}

impl<T> QueryEnvelope<T> {
    pub fn new(items: Vec<T>) -> Self {
        let count = items.len();
        Self { items, count }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Body of `POST /board`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateBoardRequest {
    #[serde(rename = "BoardName")]
    pub board_name: String,
}

/// Board id/name pair answered by create and rename
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSummary {
    #[serde(rename = "BoardId")]
    pub board_id: String,
    #[serde(rename = "BoardName")]
    pub board_name: String,
}

/// Body of `PATCH /board/{board_id}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateBoardRequest {
    #[serde(rename = "BoardName")]
    pub board_name: String,
}

/// Body of `POST /board/{board_id}/note`
///
/// `single_note` stays a raw JSON value so the handler can run the
/// structural shape check before committing to the typed model.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateNoteRequest {
    #[serde(rename = "noteId")]
    pub note_id: String,
    #[serde(rename = "singleNote")]
    pub single_note: serde_json::Value,
}

/// Body of `PATCH /board/{board_id}/note/{note_id}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateNoteRequest {
    #[serde(rename = "singleNote")]
    pub single_note: serde_json::Value,
}
