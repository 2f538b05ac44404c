//! Showroom server binary

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use showroom::api::{create_router, AppState};
use showroom::catalog::{CatalogStore, MemoryStore};
use showroom::config::{AppConfig, LogFormat};
use showroom::media::create_media_store;
use showroom::seed;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;

    init_tracing(&config)?;

    let store: Arc<dyn CatalogStore> = Arc::new(MemoryStore::new());

    // Import the scraped catalog before accepting traffic
    if let Some(data_dir) = &config.catalog.data_dir {
        let stats = seed::load_dir(store.as_ref(), Path::new(data_dir))
            .await
            .with_context(|| format!("failed to import catalog from {data_dir}"))?;
        tracing::info!(
            models = stats.models,
            variants = stats.variants,
            "catalog seeded",
        );
    }

    let media_config = config.media_runtime().context("invalid media configuration")?;
    let media = create_media_store(media_config).await?;

    if config.admin.api_key.is_none() {
        tracing::warn!("no admin API key configured; admin surface is disabled");
    }

    let state = AppState::new(store, Arc::from(media), config.admin.api_key.clone());
    let router = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    tracing::info!(%addr, "Listening for HTTP traffic");

    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.logging.level.clone()))
        .unwrap_or_else(|_| EnvFilter::new("showroom=info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format {
        LogFormat::Json => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        LogFormat::Text => {
            registry.with(tracing_subscriber::fmt::layer()).init();
        }
    }

    Ok(())
}
