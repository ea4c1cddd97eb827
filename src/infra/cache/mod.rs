//! Cache layer.
//!
//! [`CacheStore`] is the injected key-value abstraction (string key to a
//! value with an expiry). [`RedisCache`] and [`MemoryCache`] implement it;
//! [`UnavailableCache`] stands in when Redis cannot be reached at startup.
//! Services never talk to a store directly: they go through
//! [`BestEffortCache`], which logs and swallows every store failure.

mod best_effort;
mod keys;
mod memory;
mod redis;
mod unavailable;

use std::time::Duration;

use async_trait::async_trait;

use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

pub use best_effort::BestEffortCache;
pub use keys::{user_email_key, user_key, ALL_USERS_KEY};
pub use memory::MemoryCache;
pub use self::redis::RedisCache;
pub use unavailable::UnavailableCache;

/// Key-value store with per-entry expiry.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Read a raw value. Expired entries read as `None`.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Store a raw value that expires after `ttl`.
    async fn put(&self, key: &str, value: String, ttl: Duration) -> AppResult<()>;

    /// Remove a key. Removing a missing key is not an error.
    async fn forget(&self, key: &str) -> AppResult<()>;

    /// Check connectivity.
    async fn ping(&self) -> AppResult<()>;
}
