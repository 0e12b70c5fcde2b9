//! Document Store
//!
//! Abstraction over the external document database holding board documents
//! and the WebSocket connection registry table. The trait surface mirrors
//! what the handlers actually need from a managed key-value store:
//! full scan, query-by-index, get/put/delete by key, and a small set of
//! atomic single-document update operations.
//!
//! `MemoryStore` is the in-process implementation used by the server and
//! the tests.

/// Store trait and error type
pub mod document;

/// In-memory store implementation
pub mod memory;

pub use document::{AppendOutcome, DocumentStore, StoreError};
pub use memory::MemoryStore;
