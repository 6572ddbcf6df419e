//! Property Cache - cached property listing service
//!
//! Serves the property listing through a read-through cache and a page cache,
//! backed by Redis when `REDIS_URL` is set and an in-process store otherwise.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use property_cache::api::{create_router, AppState};
use property_cache::cache::{RedisCache, RedisConnections, DEFAULT_ALIAS};
use property_cache::config::Config;
use property_cache::db::{self, SqlitePropertyRepository};
use property_cache::metrics::RedisInfoSource;
use property_cache::spawn_cleanup_task;

/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open the property database
/// 4. Select the cache backend (Redis or in-process with cleanup task)
/// 5. Serve the router until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "property_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting property cache service");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, database={}, redis={}, listing_ttl={}s, page_ttl={}s",
        config.server_port,
        config.database_url,
        config.redis_url.as_deref().unwrap_or("<in-process>"),
        config.listing_ttl,
        config.page_ttl
    );

    let pool = db::connect(&config.database_url, config.database_max_connections)
        .await
        .context("failed to open property database")?;
    let repository = Arc::new(SqlitePropertyRepository::new(pool));

    let (state, cleanup_handle) = match &config.redis_url {
        Some(url) => {
            let connections = RedisConnections::new(config.redis_timeout())
                .with_connection(DEFAULT_ALIAS, url)
                .context("invalid REDIS_URL")?;
            let cache = RedisCache::connect(&connections, DEFAULT_ALIAS)
                .await
                .context("failed to connect to Redis")?;
            let stats = RedisInfoSource::new(connections, DEFAULT_ALIAS);
            info!("Using Redis cache backend");

            (
                AppState::new(Arc::new(cache), repository, Arc::new(stats), &config),
                None,
            )
        }
        None => {
            let (state, local) = AppState::with_local_cache(repository, &config);
            info!(
                "Using in-process cache backend (max_entries={})",
                config.max_entries
            );

            (state, Some(spawn_cleanup_task(local, config.cleanup_interval)))
        }
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops the cleanup task.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
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

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }
}
