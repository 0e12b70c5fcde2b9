//! WebSocket Endpoint
//!
//! `GET /ws` upgrades the connection, assigns it a fresh connection id and
//! registers it in the connection registry. The optional `board` query
//! parameter scopes the connection to one board; without it the
//! connection receives every broadcast.
//!
//! Inbound text frames carrying `{"message": ...}` are relayed to the
//! sender's scope through the dispatcher, with the sender's own id
//! excluded from the fan-out. Close or transport error deregisters the
//! connection and removes the session.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::backend::broadcast::BroadcastScope;
use crate::backend::error::ApiError;
use crate::backend::registry::ConnectionScope;
use crate::backend::server::state::AppState;
use crate::shared::event::BoardEvent;
use crate::shared::validation::validate_identifier;

/// Query parameters of the `/ws` upgrade request
#[derive(Debug, Deserialize)]
pub struct WsQuery {
    /// Board id to watch; absent means a global registration
    pub board: Option<String>,
}

/// `GET /ws` - upgrade to a WebSocket connection
pub async fn handle_ws_upgrade(
    State(state): State<AppState>,
    Query(query): Query<WsQuery>,
    ws: WebSocketUpgrade,
) -> Result<Response, ApiError> {
    let scope = match query.board {
        Some(board_id) => {
            validate_identifier("board", &board_id)?;
            ConnectionScope::Board(board_id)
        }
        None => ConnectionScope::Global,
    };

    Ok(ws
        .on_upgrade(move |socket| run_session(state, scope, socket))
        .into_response())
}

/// Drive one WebSocket session until it closes
async fn run_session(state: AppState, scope: ConnectionScope, socket: WebSocket) {
    let connection_id = Uuid::new_v4().to_string();
    tracing::info!("[WS] Connection {} opened ({:?})", connection_id, scope);

    // Install the session and register the connection. Registration
    // failure is logged and the socket dropped; a connection the
    // dispatcher cannot see is useless.
    let (tx, mut outbound) = mpsc::unbounded_channel::<String>();
    state.sessions.insert(&connection_id, tx);
    if let Err(e) = state.registry.register(&connection_id, scope.clone()).await {
        tracing::error!("[WS] Failed to register connection {}: {}", connection_id, e);
        state.sessions.remove(&connection_id);
        return;
    }

    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            payload = outbound.recv() => {
                match payload {
                    Some(payload) => {
                        if sink.send(Message::Text(payload.into())).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }
            frame = stream.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => {
                        handle_inbound(&state, &scope, &connection_id, text.as_str()).await;
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {} // ping/pong handled by axum
                    Some(Err(e)) => {
                        tracing::warn!("[WS] Transport error on {}: {}", connection_id, e);
                        break;
                    }
                }
            }
        }
    }

    state.sessions.remove(&connection_id);
    if let Err(e) = state.registry.deregister(&connection_id).await {
        tracing::warn!("[WS] Failed to deregister connection {}: {}", connection_id, e);
    }
    tracing::info!("[WS] Connection {} closed", connection_id);
}

/// Relay one inbound frame to the sender's scope, excluding the sender
async fn handle_inbound(state: &AppState, scope: &ConnectionScope, connection_id: &str, text: &str) {
    let body: serde_json::Value = match serde_json::from_str(text) {
        Ok(body) => body,
        Err(_) => {
            tracing::warn!("[WS] Non-JSON frame from {}, ignoring", connection_id);
            return;
        }
    };
    let message = match body.get("message") {
        Some(message) => message.clone(),
        None => {
            tracing::warn!("[WS] Frame without message field from {}", connection_id);
            let _ = state.sessions.send(
                connection_id,
                serde_json::json!({ "error": "message is required" }).to_string(),
            );
            return;
        }
    };

    let board_id = scope.board_id().map(str::to_string);
    let broadcast_scope = match &board_id {
        Some(id) => BroadcastScope::Board(id.clone()),
        None => BroadcastScope::Global,
    };
    let event = BoardEvent::message(board_id, message);

    // The relay runs detached; retry backoff against failing peers must
    // not stall this session's own outbound deliveries.
    let dispatcher = state.dispatcher.clone();
    let sender_id = connection_id.to_string();
    tokio::spawn(async move {
        let report = dispatcher
            .dispatch(&broadcast_scope, &event, Some(&sender_id))
            .await;
        tracing::debug!(
            "[WS] Relayed frame from {} to {} peers ({} failed)",
            sender_id,
            report.len(),
            report.failed_ids().len()
        );
    });
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::sync::mpsc;
    use tokio::time::timeout;

    use super::*;
    use crate::backend::broadcast::{BroadcastDispatcher, SessionPusher};
    use crate::backend::realtime::SessionRegistry;
    use crate::backend::registry::ConnectionRegistry;
    use crate::backend::server::config::BoardConfig;
    use crate::backend::store::{DocumentStore, MemoryStore};

    fn test_state() -> AppState {
        let memory = Arc::new(MemoryStore::default());
        let store: Arc<dyn DocumentStore> = memory.clone();
        let registry: Arc<dyn ConnectionRegistry> = memory;
        let sessions = SessionRegistry::new();
        let pusher = Arc::new(SessionPusher::new(sessions.clone()));
        let dispatcher = BroadcastDispatcher::new(registry.clone(), pusher);
        AppState {
            store,
            registry,
            sessions,
            dispatcher,
            config: Arc::new(BoardConfig::default()),
        }
    }

    #[tokio::test]
    async fn test_inbound_frame_relayed_to_peer_after_return() {
        let state = test_state();

        let (peer_tx, mut peer_rx) = mpsc::unbounded_channel();
        state.sessions.insert("peer", peer_tx);
        state
            .registry
            .register("peer", ConnectionScope::Global)
            .await
            .unwrap();

        // returns without awaiting the fan-out; delivery lands afterwards
        handle_inbound(
            &state,
            &ConnectionScope::Global,
            "sender",
            r#"{"message": {"text": "hi"}}"#,
        )
        .await;

        let payload = timeout(Duration::from_secs(1), peer_rx.recv())
            .await
            .expect("relay did not reach the peer")
            .unwrap();
        let event: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(event["payload"]["text"], "hi");
    }

    #[tokio::test]
    async fn test_frame_without_message_answers_sender_only() {
        let state = test_state();

        let (sender_tx, mut sender_rx) = mpsc::unbounded_channel();
        state.sessions.insert("sender", sender_tx);
        let (peer_tx, mut peer_rx) = mpsc::unbounded_channel();
        state.sessions.insert("peer", peer_tx);
        state
            .registry
            .register("peer", ConnectionScope::Global)
            .await
            .unwrap();

        handle_inbound(&state, &ConnectionScope::Global, "sender", r#"{"other": 1}"#).await;

        let payload = sender_rx.recv().await.unwrap();
        let body: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(body["error"], "message is required");
        assert!(peer_rx.try_recv().is_err());
    }
}
