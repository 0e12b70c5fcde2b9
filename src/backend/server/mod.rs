//! Server Setup
//!
//! Application state, configuration loading and the `create_app` wiring
//! that assembles the router with its collaborators.

/// Application state container
pub mod state;

/// Server initialization
pub mod init;

/// Environment configuration
pub mod config;

pub use config::BoardConfig;
pub use init::create_app;
pub use state::AppState;
