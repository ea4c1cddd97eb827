//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{BestEffortCache, CacheStore, Database};
use crate::services::{UserCacheService, UserService};

/// Shared handles available to every handler.
#[derive(Clone)]
pub struct AppState {
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Raw cache store (health checks only; services use the best-effort wrapper)
    pub cache: Arc<dyn CacheStore>,
    /// Database connection, absent when the service runs on injected fakes
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Wire the SeaORM store and the configured cache into a [`UserCacheService`].
    pub fn from_config(database: Arc<Database>, cache: Arc<dyn CacheStore>, config: &Config) -> Self {
        let repo = Arc::new(database.user_store());
        let user_service = Arc::new(UserCacheService::new(
            repo,
            BestEffortCache::new(cache.clone(), config.cache_ttl()),
        ));

        Self {
            user_service,
            cache,
            database: Some(database),
        }
    }

    /// Create application state with a manually injected service.
    pub fn new(user_service: Arc<dyn UserService>, cache: Arc<dyn CacheStore>) -> Self {
        Self {
            user_service,
            cache,
            database: None,
        }
    }
}
