mod configuration;
mod error;
mod routes;
mod state;

use anyhow::Result;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;
use voxbridge::providers::factory::ProviderRegistry;

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up a local .env before anything reads the environment
    let dotenv_path = dotenv::dotenv().ok();

    // Initialize tracing for logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Some(path) = dotenv_path {
        info!("Loaded environment from {:?}", path);
    }

    // Load configuration
    let settings = configuration::Settings::new()?;

    // Create app state with a client for every configured provider
    let registry = ProviderRegistry::new(settings.provider_configs())?;
    if registry.configured().is_empty() {
        tracing::warn!("No provider API keys configured; every create-agent request will fail");
    }
    for provider in registry.configured() {
        info!("Provider {} is configured", provider);
    }
    let state = state::AppState::new(registry);

    // Create router with CORS support
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::configure(state).layer(cors);
    let listener = tokio::net::TcpListener::bind(settings.server.socket_addr()?).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
