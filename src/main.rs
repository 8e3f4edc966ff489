use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use mediashelf_api::api::{create_router, AppState};
use mediashelf_api::config::Config;
use mediashelf_api::services::{GeminiBackend, RecommendationAssistant};
use mediashelf_api::store::InMemoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let backend = Arc::new(GeminiBackend::new(&config)?);
    let assistant = Arc::new(RecommendationAssistant::new(backend));
    let state = AppState::new(Arc::new(InMemoryStore::new()), assistant);

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "media tracker listening");
    axum::serve(listener, app).await?;

    Ok(())
}
