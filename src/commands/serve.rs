//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::{CacheDriver, Config};
use crate::errors::{AppError, AppResult};
use crate::infra::{CacheStore, Database, MemoryCache, RedisCache, UnavailableCache};

/// Execute the serve command
pub async fn execute(args: ServeArgs, mut config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    // Command-line flags win over SERVER_HOST / SERVER_PORT
    if let Some(host) = args.host {
        config.server_host = host;
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }

    let db = Database::connect(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    let cache = connect_cache(&config).await;

    let app_state = AppState::from_config(Arc::new(db), cache, &config);
    let app = create_router(app_state);

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}

/// Build the cache store selected by `CACHE_DRIVER`.
///
/// An unreachable Redis does not stop the server: requests are served from
/// the database and `/health` reports the cache as unhealthy until restart.
async fn connect_cache(config: &Config) -> Arc<dyn CacheStore> {
    let cache: Arc<dyn CacheStore> = match config.cache_driver {
        CacheDriver::Redis => match RedisCache::connect(&config.redis_url).await {
            Ok(redis) => Arc::new(redis),
            Err(e) => {
                tracing::warn!(error = %e, "Redis unavailable, serving without a cache");
                Arc::new(UnavailableCache::new(e.to_string()))
            }
        },
        CacheDriver::Memory => {
            tracing::info!("Using in-process memory cache");
            Arc::new(MemoryCache::new())
        }
    };

    tracing::info!(ttl_seconds = config.cache_ttl().as_secs(), "Cache ready");
    cache
}
