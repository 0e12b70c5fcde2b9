//! WebSocket Session Table
//!
//! Maps connection ids to the outbound channel of their socket task. The
//! session pusher looks connections up here to deliver payloads; the
//! socket task installs itself on connect and removes itself on
//! disconnect.
//!
//! Payloads cross the channel as plain JSON strings so the table stays
//! independent of the socket message type.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

/// Shared table of live sessions
///
/// Cloning is cheap; all clones share the same underlying table.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<Mutex<HashMap<String, mpsc::UnboundedSender<String>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a session's outbound channel under its connection id
    pub fn insert(&self, connection_id: &str, tx: mpsc::UnboundedSender<String>) {
        let mut sessions = self.sessions.lock().expect("session table poisoned");
        sessions.insert(connection_id.to_string(), tx);
        tracing::debug!(
            "[Sessions] Installed session {} ({} live)",
            connection_id,
            sessions.len()
        );
    }

    /// Remove a session after disconnect
    pub fn remove(&self, connection_id: &str) {
        let mut sessions = self.sessions.lock().expect("session table poisoned");
        sessions.remove(connection_id);
        tracing::debug!(
            "[Sessions] Removed session {} ({} live)",
            connection_id,
            sessions.len()
        );
    }

    /// Hand a payload to the session's socket task
    ///
    /// Returns false if the connection id is unknown or its task has gone
    /// away.
    pub fn send(&self, connection_id: &str, payload: String) -> bool {
        let sessions = self.sessions.lock().expect("session table poisoned");
        match sessions.get(connection_id) {
            Some(tx) => tx.send(payload).is_ok(),
            None => false,
        }
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.sessions.lock().expect("session table poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
