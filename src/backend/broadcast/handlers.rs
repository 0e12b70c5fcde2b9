//! Broadcast Invocation Endpoint
//!
//! `POST /broadcast` pushes a message to every connection in scope. The
//! body carries a required `message` field and an optional `boardId`
//! narrowing the scope to one board; without it the fan-out targets the
//! full registry. A missing `message` answers 418, kept from the original
//! API.
//!
//! When the invocation carries gateway context (forwarded host/stage
//! headers) or a push endpoint is configured, delivery goes through the
//! HTTP gateway pusher for this call; otherwise the in-process sessions
//! are used.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::backend::broadcast::dispatcher::BroadcastScope;
use crate::backend::broadcast::push::{resolve_push_endpoint, HttpPusher};
use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;
use crate::shared::event::BoardEvent;
use crate::shared::validation::validate_identifier;

/// Summary of a broadcast answered to the caller
#[derive(Debug, Serialize)]
pub struct BroadcastResponse {
    pub delivered: usize,
    pub failed: Vec<String>,
}

/// `POST /broadcast` - fan a message out to connected clients
pub async fn handle_broadcast(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, ApiError> {
    let message = match body.get("message") {
        Some(message) => message.clone(),
        None => {
            // the original answered 418 when no message was supplied
            tracing::warn!("[Broadcast] Invocation without a message field");
            return Ok((
                StatusCode::IM_A_TEAPOT,
                Json(serde_json::json!({ "error": "message is required" })),
            )
                .into_response());
        }
    };

    let board_id = body
        .get("boardId")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string);
    if let Some(id) = &board_id {
        validate_identifier("boardId", id)?;
    }
    let scope = match board_id.clone() {
        Some(id) => BroadcastScope::Board(id),
        None => BroadcastScope::Global,
    };

    // The invoking connection, if any, is excluded from the fan-out.
    let own_connection = headers
        .get("x-connection-id")
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);

    let dispatcher = match resolve_push_endpoint(
        &headers,
        state.config.ws_push_endpoint.as_deref(),
    ) {
        Some(endpoint) => {
            tracing::info!("[Broadcast] Pushing through gateway endpoint {}", endpoint);
            state
                .dispatcher
                .with_pusher(Arc::new(HttpPusher::new(endpoint)))
        }
        None => state.dispatcher.clone(),
    };

    let event = BoardEvent::message(board_id, message);
    let report = dispatcher
        .dispatch(&scope, &event, own_connection.as_deref())
        .await;

    let response = BroadcastResponse {
        delivered: report.delivered_count(),
        failed: report.failed_ids().iter().map(|s| s.to_string()).collect(),
    };
    Ok(Json(response).into_response())
}
