//! Connection Registry
//!
//! Tracks which WebSocket connection ids are live and which board, if any,
//! each one is watching. Registrations are written by the connect and
//! disconnect paths of the WebSocket surface and read by the broadcast
//! dispatcher when it resolves a fan-out target set.
//!
//! The registry lives in the connections table of the document store,
//! next to the board table.

use async_trait::async_trait;

use crate::backend::store::StoreError;

/// Scope of a connection registration
///
/// A connection either watches one board or is registered globally and
/// receives every broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionScope {
    /// Watching a single board
    Board(String),
    /// Receives all broadcasts
    Global,
}

impl ConnectionScope {
    /// The board id this scope targets, if it is board-scoped
    pub fn board_id(&self) -> Option<&str> {
        match self {
            Self::Board(id) => Some(id),
            Self::Global => None,
        }
    }
}

/// Read/write access to the live-connection table
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// Record a new live connection
    async fn register(
        &self,
        connection_id: &str,
        scope: ConnectionScope,
    ) -> Result<(), StoreError>;

    /// Remove a connection after disconnect (or a `Gone` push result)
    async fn deregister(&self, connection_id: &str) -> Result<(), StoreError>;

    /// Connection ids registered for one board
    async fn connections_for_board(&self, board_id: &str) -> Result<Vec<String>, StoreError>;

    /// Full scan of the registry: every live connection id
    async fn all_connections(&self) -> Result<Vec<String>, StoreError>;
}
