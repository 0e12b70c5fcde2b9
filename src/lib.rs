//! StickyBoard - Main Library
//!
//! Backend for a sticky-notes board application: a REST CRUD API over a
//! document store for boards and notes, plus a WebSocket broadcast layer
//! that pushes update notifications to connected clients.
//!
//! # Architecture
//!
//! The crate is split into two top-level modules:
//!
//! - **`shared`** - Serializable domain types, wire request/response types,
//!   update events and pure validation functions.
//! - **`backend`** - The Axum server: state, routes, CRUD handlers, the
//!   document store abstraction, the connection registry and the broadcast
//!   dispatcher.

/// Types shared across the API surface (model, validation, events)
pub mod shared;

/// Server-side code (Axum handlers, store, broadcast)
pub mod backend;
