//! Server Configuration
//!
//! Configuration comes from environment variables, loaded once at startup.
//! Missing values degrade to defaults with a warning; configuration never
//! aborts startup.
//!
//! # Variables
//!
//! - `SERVER_PORT` - listen port (default 3000)
//! - `BOARD_TABLE` - board table name (default `BoardTable`)
//! - `CONNECTIONS_TABLE` - connection registry table name
//!   (default `BoardTable_WSConnections`)
//! - `BOARD_REGION` - region label for log lines (optional)
//! - `WS_PUSH_ENDPOINT` - external WebSocket gateway endpoint; when set,
//!   `POST /broadcast` pushes through the gateway instead of the
//!   in-process sessions (optional)

/// Externally supplied server configuration
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Listen port
    pub port: u16,
    /// Board table name
    pub board_table: String,
    /// Connection registry table name
    pub connections_table: String,
    /// Region label, if supplied
    pub region: Option<String>,
    /// Statically configured push endpoint fallback
    pub ws_push_endpoint: Option<String>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            board_table: "BoardTable".to_string(),
            connections_table: "BoardTable_WSConnections".to_string(),
            region: None,
            ws_push_endpoint: None,
        }
    }
}

impl BoardConfig {
    /// Load configuration from the environment
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = match std::env::var("SERVER_PORT") {
            Ok(raw) => raw.parse::<u16>().unwrap_or_else(|_| {
                tracing::warn!("SERVER_PORT '{}' is not a valid port, using 3000", raw);
                defaults.port
            }),
            Err(_) => defaults.port,
        };

        let board_table =
            std::env::var("BOARD_TABLE").unwrap_or_else(|_| defaults.board_table.clone());
        let connections_table = std::env::var("CONNECTIONS_TABLE")
            .unwrap_or_else(|_| defaults.connections_table.clone());
        let region = std::env::var("BOARD_REGION").ok().filter(|r| !r.is_empty());
        let ws_push_endpoint = std::env::var("WS_PUSH_ENDPOINT")
            .ok()
            .filter(|e| !e.is_empty());

        if ws_push_endpoint.is_none() {
            tracing::warn!(
                "WS_PUSH_ENDPOINT not set, broadcasts deliver to in-process sessions only"
            );
        }

        Self {
            port,
            board_table,
            connections_table,
            region,
            ws_push_endpoint,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BoardConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.board_table, "BoardTable");
        assert_eq!(config.connections_table, "BoardTable_WSConnections");
        assert!(config.ws_push_endpoint.is_none());
    }
}
