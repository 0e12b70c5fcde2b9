/**
 * StickyBoard Server Entry Point
 *
 * Initializes tracing, assembles the Axum application and serves it on
 * the configured port.
 */

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    tracing::info!("[STARTUP] Server initialization started");

    let config = stickyboard::backend::BoardConfig::from_env();
    let port = config.port;
    let app = stickyboard::backend::server::init::create_app_with_config(config).await;

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("[STARTUP] Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
