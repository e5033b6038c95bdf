use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;
use vetqa_server::{ServerConfig, build_state, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env();
    info!(dataset = %config.engine.dataset_path.display(), "initializing chatbot service");

    // Blocks until the engine is ready or has observably failed; a failed
    // engine still serves so health checks can report it.
    let state = build_state(config.engine).await;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "chatbot service listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
