//! Update-Notification Events
//!
//! Defines the event payload pushed to WebSocket connections whenever a
//! board changes, and the relay event for client-originated broadcast
//! messages.

use serde::{Deserialize, Serialize};

/// Kind of board update being announced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardEventType {
    BoardCreated,
    BoardRenamed,
    BoardDeleted,
    NoteCreated,
    NoteUpdated,
    NoteDeleted,
    /// Free-form message relayed from one connection to its peers
    Message,
}

/// An update notification pushed to connected clients
///
/// `board_id` is absent for global-scope broadcasts. The payload carries
/// whatever the triggering operation wants the clients to see (the new
/// note, the renamed board, a relayed message body).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardEvent {
    pub event_type: BoardEventType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board_id: Option<String>,
    pub payload: serde_json::Value,
    pub timestamp: String,
}

impl BoardEvent {
    /// Create a new event stamped with the current time
    pub fn new(
        event_type: BoardEventType,
        board_id: Option<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            event_type,
            board_id,
            payload,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Create a board-scoped event
    pub fn for_board(
        event_type: BoardEventType,
        board_id: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self::new(event_type, Some(board_id.into()), payload)
    }

    /// Create a relayed message event
    pub fn message(board_id: Option<String>, payload: serde_json::Value) -> Self {
        Self::new(BoardEventType::Message, board_id, payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_serializes_snake_case() {
        let event = BoardEvent::for_board(
            BoardEventType::NoteCreated,
            "board-1",
            serde_json::json!({"noteId": "n1"}),
        );
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event_type"], "note_created");
        assert_eq!(json["board_id"], "board-1");
    }

    #[test]
    fn test_global_event_omits_board_id() {
        let event = BoardEvent::message(None, serde_json::json!("hello"));
        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("board_id").is_none());
    }

    #[test]
    fn test_event_roundtrip() {
        let event = BoardEvent::message(Some("b".to_string()), serde_json::json!({"m": 1}));
        let json = serde_json::to_string(&event).unwrap();
        let back: BoardEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
