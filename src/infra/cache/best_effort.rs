//! Best-effort access to a [`CacheStore`].
//!
//! Every failure (connection, serialization, corrupt entry) is logged at
//! `warn` and turned into a miss or a no-op. Callers cannot observe a cache
//! error, so a cache outage never fails the surrounding operation.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};

use super::CacheStore;
use crate::errors::AppResult;

/// Cache handle that swallows store failures.
#[derive(Clone)]
pub struct BestEffortCache {
    store: Arc<dyn CacheStore>,
    ttl: Duration,
}

impl BestEffortCache {
    pub fn new(store: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Read and decode a value. Failures read as a miss.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.store.get(key).await {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(value) => {
                    tracing::debug!(key = %key, "Cache hit");
                    Some(value)
                }
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Discarding undecodable cache entry");
                    None
                }
            },
            Ok(None) => {
                tracing::debug!(key = %key, "Cache miss");
                None
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Cache read failed, treating as miss");
                None
            }
        }
    }

    /// Encode and store a value with the configured TTL.
    pub async fn put<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Cache serialization failed");
                return;
            }
        };

        if let Err(e) = self.store.put(key, json, self.ttl).await {
            tracing::warn!(key = %key, error = %e, "Cache write failed");
        }
    }

    /// Remove a key.
    pub async fn forget(&self, key: &str) {
        if let Err(e) = self.store.forget(key).await {
            tracing::warn!(key = %key, error = %e, "Cache invalidation failed");
        }
    }

    /// Read-through: return the cached value, or run `load`, cache its result
    /// and return it. Errors from `load` propagate untouched.
    pub async fn remember<T, F, Fut>(&self, key: &str, load: F) -> AppResult<T>
    where
        T: Serialize + DeserializeOwned + Send,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = AppResult<T>> + Send,
    {
        if let Some(value) = self.get(key).await {
            return Ok(value);
        }

        let value = load().await?;
        self.put(key, &value).await;
        Ok(value)
    }
}
