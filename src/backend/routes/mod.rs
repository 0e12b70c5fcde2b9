//! Route Configuration
//!
//! Router assembly for the board API, the broadcast invocation endpoint
//! and the WebSocket surface.

/// Main router creation
pub mod router;

/// Board and note resource routes
pub mod board_routes;

pub use router::create_router;
