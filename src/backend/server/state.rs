//! Application State Management
//!
//! The `AppState` struct is the central state container handed to every
//! Axum handler. It holds the shared collaborators behind `Arc`s; no
//! request-scoped data lives here. Each inbound call constructs its own
//! locals, so nothing is shared across concurrent invocations except
//! these explicitly shared services.

use std::sync::Arc;

use crate::backend::broadcast::{BroadcastDispatcher, BroadcastScope};
use crate::backend::registry::ConnectionRegistry;
use crate::backend::realtime::SessionRegistry;
use crate::backend::server::config::BoardConfig;
use crate::backend::store::DocumentStore;
use crate::shared::event::BoardEvent;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The board document store
    pub store: Arc<dyn DocumentStore>,
    /// The live-connection registry
    pub registry: Arc<dyn ConnectionRegistry>,
    /// In-process WebSocket session table
    pub sessions: SessionRegistry,
    /// The broadcast dispatcher (session-backed pusher)
    pub dispatcher: BroadcastDispatcher,
    /// Server configuration
    pub config: Arc<BoardConfig>,
}

impl AppState {
    /// Fire an update notification for a board on a detached task
    ///
    /// CRUD handlers call this after a successful mutation. Delivery
    /// outcomes only show up in the logs; they never affect the HTTP
    /// response that triggered them.
    pub fn notify_board(&self, board_id: &str, event: BoardEvent) {
        let dispatcher = self.dispatcher.clone();
        let scope = BroadcastScope::Board(board_id.to_string());
        tokio::spawn(async move {
            let report = dispatcher.dispatch(&scope, &event, None).await;
            if !report.all_delivered() {
                tracing::warn!(
                    "[Notify] {} of {} deliveries failed",
                    report.failed_ids().len(),
                    report.len()
                );
            }
        });
    }
}
