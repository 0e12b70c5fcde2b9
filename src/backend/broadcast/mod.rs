//! Broadcast Fan-out
//!
//! Delivers update notifications to WebSocket connections. The dispatcher
//! resolves a target set from the connection registry, pushes the payload
//! to every connection concurrently, aggregates per-connection outcomes
//! and retries transient failures with a bounded backoff. One failing
//! delivery never blocks or aborts the others.

/// Push capability trait and implementations
pub mod push;

/// The fan-out dispatcher
pub mod dispatcher;

/// HTTP invocation endpoint (`POST /broadcast`)
pub mod handlers;

pub use dispatcher::{
    BroadcastDispatcher, BroadcastReport, BroadcastScope, DeliveryOutcome, DeliveryStatus,
    RetryPolicy,
};
pub use push::{ConnectionPusher, HttpPusher, PushError, SessionPusher};
