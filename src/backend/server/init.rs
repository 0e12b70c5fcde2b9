//! Server Initialization
//!
//! Assembles the application: configuration, the in-memory document store
//! (standing in for the managed database), the session table, the
//! dispatcher wired to the in-process session pusher, and the router.

use std::sync::Arc;

use axum::Router;

use crate::backend::broadcast::{BroadcastDispatcher, SessionPusher};
use crate::backend::realtime::SessionRegistry;
use crate::backend::registry::ConnectionRegistry;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::BoardConfig;
use crate::backend::server::state::AppState;
use crate::backend::store::{DocumentStore, MemoryStore};

/// Create and configure the Axum application
///
/// # Initialization Steps
///
/// 1. Load configuration from the environment
/// 2. Create the document store (board table + connection registry)
/// 3. Create the session table and the session-backed pusher
/// 4. Wire the broadcast dispatcher
/// 5. Build the router
pub async fn create_app() -> Router<()> {
    let config = BoardConfig::from_env();
    create_app_with_config(config).await
}

/// Create the application with explicit configuration (used by tests)
pub async fn create_app_with_config(config: BoardConfig) -> Router<()> {
    tracing::info!(
        "Initializing stickyboard server (board table '{}', connections table '{}'{})",
        config.board_table,
        config.connections_table,
        config
            .region
            .as_deref()
            .map(|r| format!(", region '{}'", r))
            .unwrap_or_default()
    );

    // One MemoryStore backs both the board table and the connection
    // registry table.
    let memory = Arc::new(MemoryStore::new(
        config.board_table.clone(),
        config.connections_table.clone(),
    ));
    let store: Arc<dyn DocumentStore> = memory.clone();
    let registry: Arc<dyn ConnectionRegistry> = memory;

    let sessions = SessionRegistry::new();
    let pusher = Arc::new(SessionPusher::new(sessions.clone()));
    let dispatcher = BroadcastDispatcher::new(registry.clone(), pusher);

    let app_state = AppState {
        store,
        registry,
        sessions,
        dispatcher,
        config: Arc::new(config),
    };

    tracing::info!("Store, sessions and dispatcher initialized");

    create_router(app_state)
}
