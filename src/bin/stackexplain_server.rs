//! stackexplain HTTP API server
//!
//! Usage:
//!   cargo run --bin stackexplain-server
//!
//! Environment:
//!   OPENROUTER_API_KEY  - API key (required, may come from .env)
//!   STACKEXPLAIN_CONFIG - Optional TOML config file
//!   PORT / STACKEXPLAIN_PORT - Server port (default: 8000)
//!   STACKEXPLAIN_HOST   - Server host (default: 0.0.0.0)
//!   RUST_LOG            - Log filter (default: stackexplain=info)

use stackexplain::server::{build_state, create_router};
use stackexplain::utils::{logger, validation::Validate};
use stackexplain::AppConfig;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init_server_logger();

    let config_path = std::env::var("STACKEXPLAIN_CONFIG").ok().map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref())?;

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let state = Arc::new(build_state(&config)?);
    let app = create_router(state);

    let host = std::env::var("STACKEXPLAIN_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .or_else(|_| std::env::var("STACKEXPLAIN_PORT"))
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("stackexplain API listening on http://{}", addr);
    info!("Model: {} | link checks: {}", config.model, config.verify_links);
    info!("  POST /explain  - Explain an error message");
    info!("  GET  /health   - Health check");

    let listener = TcpListener::bind(addr).await?;

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("stackexplain API shutdown complete");
    Ok(())
}
