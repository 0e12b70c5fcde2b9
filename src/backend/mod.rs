//! Backend Module
//!
//! All server-side code for the sticky-notes board application: an Axum
//! HTTP server exposing the board/note CRUD API, a WebSocket connect
//! surface, and the broadcast dispatcher that fans update notifications
//! out to registered connections.
//!
//! # Architecture
//!
//! - **`server`** - initialization, application state, configuration
//! - **`routes`** - HTTP route assembly
//! - **`board`** / **`note`** - CRUD handlers
//! - **`store`** - document store abstraction and in-memory tables
//! - **`registry`** - live-connection registry
//! - **`broadcast`** - push capability, fan-out dispatcher, invocation
//!   endpoint
//! - **`realtime`** - WebSocket upgrade and session handling
//! - **`error`** - HTTP-facing error types
//!
//! # Concurrency
//!
//! Each request runs as an independent task with its own locals; shared
//! services live behind `Arc` in [`server::AppState`]. Store operations
//! within a request are awaited sequentially, except broadcast fan-out
//! where all per-connection deliveries are issued concurrently and
//! jointly awaited.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Board CRUD handlers
pub mod board;

/// Note CRUD handlers
pub mod note;

/// Document store abstraction
pub mod store;

/// Live-connection registry
pub mod registry;

/// Broadcast fan-out
pub mod broadcast;

/// WebSocket surface
pub mod realtime;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use broadcast::{BroadcastDispatcher, BroadcastReport, BroadcastScope};
pub use error::ApiError;
pub use server::{create_app, AppState, BoardConfig};
