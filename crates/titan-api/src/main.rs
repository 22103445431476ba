//! Form-Titan API - Main Entry Point

use std::sync::Arc;
use titan_api::{build_router, AppState, ServerConfig};
use titan_forms::{FormStore, InMemoryFormStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, load_error) = ServerConfig::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Form-Titan API v{}", env!("CARGO_PKG_VERSION"));
    if let Some(e) = load_error {
        tracing::warn!(error = %e, "config not loaded, using defaults");
    }

    let store: Arc<dyn FormStore> = if config.seed_sample_form {
        Arc::new(InMemoryFormStore::with_sample())
    } else {
        Arc::new(InMemoryFormStore::new())
    };

    let addr = config.bind_addr.clone();
    let app = build_router(AppState::new(store.clone(), config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Form-Titan API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await?;
    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutdown signal received");
}
