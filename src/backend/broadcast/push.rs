//! Connection Push Capability
//!
//! The dispatcher delivers payloads through the [`ConnectionPusher`]
//! trait: one payload to one connection id, success or a classified
//! failure. Two implementations:
//!
//! - [`SessionPusher`] - in-process delivery to sockets this server holds,
//!   via the session table.
//! - [`HttpPusher`] - delivery through an external WebSocket gateway that
//!   exposes a post-to-connection endpoint.
//!
//! # Endpoint selection
//!
//! When pushing through a gateway, the destination endpoint is derived per
//! invocation from the triggering request's forwarded host and stage
//! headers when present, falling back to the statically configured
//! endpoint otherwise.

use async_trait::async_trait;
use axum::http::HeaderMap;
use thiserror::Error;

use crate::backend::realtime::SessionRegistry;

/// Failure to deliver a payload to one connection
#[derive(Debug, Error, Clone)]
pub enum PushError {
    /// The connection no longer exists; registration should be dropped
    #[error("Connection {connection_id} is gone")]
    Gone {
        /// The dead connection's id
        connection_id: String,
    },

    /// Transient transport failure; worth retrying
    #[error("Push transport error: {message}")]
    Transport {
        /// Human-readable error message
        message: String,
    },
}

impl PushError {
    /// Create a gone error for a dead connection
    pub fn gone(connection_id: impl Into<String>) -> Self {
        Self::Gone {
            connection_id: connection_id.into(),
        }
    }

    /// Create a transient transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// True for failures that a bounded retry can recover from
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

/// Deliver one payload to one connection id
#[async_trait]
pub trait ConnectionPusher: Send + Sync {
    async fn push(&self, connection_id: &str, payload: &str) -> Result<(), PushError>;
}

/// In-process pusher backed by the live session table
#[derive(Clone)]
pub struct SessionPusher {
    sessions: SessionRegistry,
}

impl SessionPusher {
    pub fn new(sessions: SessionRegistry) -> Self {
        Self { sessions }
    }
}

#[async_trait]
impl ConnectionPusher for SessionPusher {
    async fn push(&self, connection_id: &str, payload: &str) -> Result<(), PushError> {
        if self.sessions.send(connection_id, payload.to_string()) {
            Ok(())
        } else {
            Err(PushError::gone(connection_id))
        }
    }
}

/// Pusher that posts payloads to an external WebSocket gateway
///
/// The gateway is expected to accept
/// `POST {endpoint}/@connections/{connection_id}` with the payload as the
/// request body, answering 410 when the connection has gone away.
pub struct HttpPusher {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpPusher {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl ConnectionPusher for HttpPusher {
    async fn push(&self, connection_id: &str, payload: &str) -> Result<(), PushError> {
        let url = format!(
            "{}/@connections/{}",
            self.endpoint.trim_end_matches('/'),
            connection_id
        );
        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .body(payload.to_string())
            .send()
            .await
            .map_err(|e| PushError::transport(e.to_string()))?;

        match response.status() {
            status if status.is_success() => Ok(()),
            reqwest::StatusCode::GONE => Err(PushError::gone(connection_id)),
            status => Err(PushError::transport(format!(
                "gateway answered {} for {}",
                status, connection_id
            ))),
        }
    }
}

/// Derive the push endpoint for one invocation
///
/// Prefers the forwarded host and stage of the triggering request
/// (`x-forwarded-host` / `x-stage` headers), falling back to the
/// configured endpoint. Returns `None` when neither source is available.
pub fn resolve_push_endpoint(headers: &HeaderMap, configured: Option<&str>) -> Option<String> {
    let forwarded_host = headers
        .get("x-forwarded-host")
        .and_then(|h| h.to_str().ok())
        .filter(|h| !h.is_empty());

    if let Some(host) = forwarded_host {
        let stage = headers
            .get("x-stage")
            .and_then(|h| h.to_str().ok())
            .filter(|s| !s.is_empty());
        return Some(match stage {
            Some(stage) => format!("https://{}/{}", host, stage),
            None => format!("https://{}", host),
        });
    }

    configured.map(|e| e.to_string())
}
