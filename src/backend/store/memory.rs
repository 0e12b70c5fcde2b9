//! In-Memory Document Store
//!
//! Two tables behind `tokio::sync::RwLock`s: the board table keyed by
//! board id and the connections table keyed by connection id. `BTreeMap`
//! keeps scan order deterministic.
//!
//! Every trait method takes the lock for the duration of the operation, so
//! the note-level updates are atomic with respect to concurrent writers on
//! the same board.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::backend::registry::{ConnectionRegistry, ConnectionScope};
use crate::backend::store::document::{AppendOutcome, DocumentStore, StoreError};
use crate::shared::board::{Board, Note, NoteTopic, QueryEnvelope};

/// In-memory implementation of the board and connections tables
pub struct MemoryStore {
    board_table: String,
    connections_table: String,
    boards: RwLock<BTreeMap<String, Board>>,
    connections: RwLock<BTreeMap<String, ConnectionScope>>,
}

impl MemoryStore {
    /// Create an empty store with the given table labels (used only in
    /// log lines)
    pub fn new(board_table: impl Into<String>, connections_table: impl Into<String>) -> Self {
        Self {
            board_table: board_table.into(),
            connections_table: connections_table.into(),
            boards: RwLock::new(BTreeMap::new()),
            connections: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of boards currently stored (test helper)
    pub async fn board_count(&self) -> usize {
        self.boards.read().await.len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new("BoardTable", "BoardTable_WSConnections")
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn scan_boards(&self) -> Result<Vec<Board>, StoreError> {
        let boards = self.boards.read().await;
        tracing::debug!(
            "[Store] Scanned {} items from {}",
            boards.len(),
            self.board_table
        );
        Ok(boards.values().cloned().collect())
    }

    async fn query_boards_by_name(&self, name: &str) -> Result<QueryEnvelope<Board>, StoreError> {
        let boards = self.boards.read().await;
        let items: Vec<Board> = boards
            .values()
            .filter(|b| b.name == name)
            .cloned()
            .collect();
        Ok(QueryEnvelope::new(items))
    }

    async fn get_board(&self, board_id: &str) -> Result<Option<Board>, StoreError> {
        Ok(self.boards.read().await.get(board_id).cloned())
    }

    async fn put_board(&self, board: Board) -> Result<(), StoreError> {
        let mut boards = self.boards.write().await;
        tracing::debug!("[Store] Put board {} into {}", board.id, self.board_table);
        boards.insert(board.id.clone(), board);
        Ok(())
    }

    async fn update_board_name(&self, board_id: &str, name: &str) -> Result<bool, StoreError> {
        let mut boards = self.boards.write().await;
        match boards.get_mut(board_id) {
            Some(board) => {
                board.name = name.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_board(&self, board_id: &str) -> Result<bool, StoreError> {
        Ok(self.boards.write().await.remove(board_id).is_some())
    }

    async fn append_note(&self, board_id: &str, note: Note) -> Result<AppendOutcome, StoreError> {
        let mut boards = self.boards.write().await;
        let board = match boards.get_mut(board_id) {
            Some(board) => board,
            None => return Ok(AppendOutcome::MissingBoard),
        };
        // the id check and the push happen under one write lock, so two
        // concurrent creates of the same id cannot both land
        if board.notes.iter().any(|n| n.note_id == note.note_id) {
            return Ok(AppendOutcome::DuplicateNote);
        }
        board.notes.push(note);
        Ok(AppendOutcome::Appended)
    }

    async fn update_note_at(
        &self,
        board_id: &str,
        index: usize,
        note_id: &str,
        topic: NoteTopic,
    ) -> Result<bool, StoreError> {
        let mut boards = self.boards.write().await;
        let board = match boards.get_mut(board_id) {
            Some(board) => board,
            None => return Ok(false),
        };
        match board.notes.get_mut(index) {
            Some(note) if note.note_id == note_id => {
                note.topic = topic;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn remove_note_at(
        &self,
        board_id: &str,
        index: usize,
        note_id: &str,
    ) -> Result<bool, StoreError> {
        let mut boards = self.boards.write().await;
        let board = match boards.get_mut(board_id) {
            Some(board) => board,
            None => return Ok(false),
        };
        match board.notes.get(index) {
            Some(note) if note.note_id == note_id => {
                board.notes.remove(index);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl ConnectionRegistry for MemoryStore {
    async fn register(
        &self,
        connection_id: &str,
        scope: ConnectionScope,
    ) -> Result<(), StoreError> {
        let mut connections = self.connections.write().await;
        tracing::debug!(
            "[Store] Registered connection {} in {}",
            connection_id,
            self.connections_table
        );
        connections.insert(connection_id.to_string(), scope);
        Ok(())
    }

    async fn deregister(&self, connection_id: &str) -> Result<(), StoreError> {
        self.connections.write().await.remove(connection_id);
        Ok(())
    }

    async fn connections_for_board(&self, board_id: &str) -> Result<Vec<String>, StoreError> {
        let connections = self.connections.read().await;
        Ok(connections
            .iter()
            .filter(|(_, scope)| scope.board_id() == Some(board_id))
            .map(|(id, _)| id.clone())
            .collect())
    }

    async fn all_connections(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.connections.read().await.keys().cloned().collect())
    }
}
