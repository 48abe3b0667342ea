use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wishlist_server::app_state::AppState;
use wishlist_server::config::Config;
use wishlist_server::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::parse();
    let state = AppState::from_config(&config)?;

    if state.api_key.is_none() {
        tracing::warn!("MCP_API_KEY not set; the server accepts unauthenticated requests");
    }

    let app = router::create_router(state);

    let addr = config.addr();
    tracing::info!("Wishlist MCP server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
