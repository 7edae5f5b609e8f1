use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use surepolicy_backend::{config::Config, routes, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    if config.api_key.is_none() {
        warn!("GEMINI_API_KEY is not set; /api/chat will answer with a configuration error");
    }
    info!(?config, "Loaded configuration");

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = Arc::new(AppState::new(config));

    // The UI is served from another origin during development.
    let cors = CorsLayer::very_permissive();
    let app = routes::create_router(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Insurance AI server running on http://localhost:{}", addr.port());
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
