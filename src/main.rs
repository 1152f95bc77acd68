//! Pokedex Cache - read-through caching backend for the PokeAPI catalog

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex_cache::{
    api::create_router, catalog::PokeApiClient, AppState, CacheLayers, Config, PokedexService,
};

/// Main entry point for the Pokedex cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache layers and the upstream client
/// 4. Start background TTL cleanup tasks
/// 5. Create Axum router with all endpoints
/// 6. Serve until SIGINT/SIGTERM, then stop the cleanup tasks
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Pokedex Cache Server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: capacity={}, ttl={}s, cleanup_interval={}s, port={}, upstream={}",
        config.cache_capacity,
        config.cache_ttl,
        config.cleanup_interval,
        config.server_port,
        config.catalog_base_url
    );

    let caches = CacheLayers::new(config.cache_capacity, config.cache_ttl())
        .context("invalid cache configuration")?;
    let source = PokeApiClient::new(config.catalog_base_url.clone(), config.request_timeout())
        .context("failed to create catalog client")?;
    let service =
        PokedexService::new(Arc::new(source), caches.clone()).with_search_config(config.search());
    info!("Cache layers initialized");

    let cleanup_tasks = caches.spawn_cleanup_tasks(config.cleanup_interval());
    info!("Background cleanup tasks started");

    let app = create_router(AppState::from_config(service, &config));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    for task in cleanup_tasks {
        task.shutdown().await;
    }
    info!("Server shutdown complete");

    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
