use std::sync::Arc;

use anime_match::{
    api::{create_router, AppState},
    config::Config,
    services::providers::AniListProvider,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("anime_match=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Initialize application state
    let catalog = Arc::new(AniListProvider::new(config.catalog_api_url.clone()));
    let state = AppState::new(catalog, config.placeholder_image_url.clone())
        .with_session_idle_timeout(config.session_idle_timeout());

    // Create the router with all routes
    let app = create_router(state);

    // Start the server
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(
        addr = %config.bind_addr(),
        catalog = %config.catalog_api_url,
        "Server running"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
