//! Router Configuration
//!
//! Combines the board CRUD routes, the broadcast invocation endpoint and
//! the WebSocket surface into the application router, with request
//! tracing and a JSON 404 fallback.

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use crate::backend::broadcast::handlers::handle_broadcast;
use crate::backend::realtime::handle_ws_upgrade;
use crate::backend::routes::board_routes::configure_board_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new();

    // Board and note CRUD
    let router = configure_board_routes(router);

    // Broadcast invocation and WebSocket connect surface
    let router = router
        .route("/broadcast", post(handle_broadcast))
        .route("/ws", get(handle_ws_upgrade))
        .route("/health", get(health));

    router
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Liveness probe
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// JSON 404 for unknown routes
async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Not Found", "status": 404 })),
    )
}
