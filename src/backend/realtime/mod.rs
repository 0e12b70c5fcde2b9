//! Real-time WebSocket Surface
//!
//! Hosts the `/ws` upgrade endpoint and the in-process session table that
//! maps live connection ids to their socket tasks. Connect and disconnect
//! events write the connection registry; inbound frames are relayed to the
//! sender's scope through the broadcast dispatcher.

/// Live WebSocket session table
pub mod sessions;

/// `/ws` upgrade handler and socket task
pub mod websocket;

pub use sessions::SessionRegistry;
pub use websocket::handle_ws_upgrade;
