//! Stand-in store for a cache backend that could not be reached.

use std::time::Duration;

use async_trait::async_trait;

use super::CacheStore;
use crate::errors::{AppError, AppResult};

/// Fails every call with the connection error it was created from.
///
/// Behind [`super::BestEffortCache`] every read is a miss and every write a
/// no-op, so requests go straight to the store while `/health` reports the
/// cache as unhealthy.
#[derive(Debug, Clone)]
pub struct UnavailableCache {
    reason: String,
}

impl UnavailableCache {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn error(&self) -> AppError {
        AppError::cache(format!("cache unavailable: {}", self.reason))
    }
}

#[async_trait]
impl CacheStore for UnavailableCache {
    async fn get(&self, _key: &str) -> AppResult<Option<String>> {
        Err(self.error())
    }

    async fn put(&self, _key: &str, _value: String, _ttl: Duration) -> AppResult<()> {
        Err(self.error())
    }

    async fn forget(&self, _key: &str) -> AppResult<()> {
        Err(self.error())
    }

    async fn ping(&self) -> AppResult<()> {
        Err(self.error())
    }
}
