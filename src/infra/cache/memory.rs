//! In-process cache store.
//!
//! Used when `CACHE_DRIVER=memory` and as the fake in tests. Expiry is
//! checked lazily on read.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;

use super::CacheStore;
use crate::errors::{AppError, AppResult};

struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// HashMap-backed cache with per-entry expiry.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a live entry exists for `key`.
    pub async fn contains(&self, key: &str) -> bool {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .get(key)
            .is_some_and(|entry| entry.is_live(now))
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.is_live(now) => return Ok(Some(entry.value.clone())),
                None => return Ok(None),
                Some(_) => {}
            }
        }

        // Expired: drop it unless it was rewritten in the meantime
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|entry| !entry.is_live(now)) {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn put(&self, key: &str, value: String, ttl: Duration) -> AppResult<()> {
        let expires_at = Instant::now()
            .checked_add(ttl)
            .ok_or_else(|| AppError::cache(format!("TTL of {}s is out of range", ttl.as_secs())))?;

        let entry = Entry { value, expires_at };
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn forget(&self, key: &str) -> AppResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: Duration = Duration::from_secs(3600);

    #[tokio::test]
    async fn test_put_get_forget() {
        let cache = MemoryCache::new();

        cache.put("user:1", "{}".to_string(), HOUR).await.unwrap();
        assert_eq!(cache.get("user:1").await.unwrap().as_deref(), Some("{}"));

        cache.forget("user:1").await.unwrap();
        assert_eq!(cache.get("user:1").await.unwrap(), None);

        // Forgetting a missing key is fine
        cache.forget("user:1").await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_entries_expire_after_ttl() {
        let cache = MemoryCache::new();
        cache.put("users:all", "[]".to_string(), HOUR).await.unwrap();

        tokio::time::advance(HOUR - Duration::from_secs(1)).await;
        assert!(cache.contains("users:all").await);

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(cache.get("users:all").await.unwrap(), None);
        assert!(!cache.contains("users:all").await);
    }

    #[tokio::test]
    async fn test_unrepresentable_ttl_is_an_error() {
        let cache = MemoryCache::new();

        let result = cache.put("user:1", "{}".to_string(), Duration::MAX).await;

        assert!(matches!(result, Err(AppError::Cache(_))));
        assert!(!cache.contains("user:1").await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rewrite_resets_expiry() {
        let cache = MemoryCache::new();
        cache.put("k", "old".to_string(), HOUR).await.unwrap();

        tokio::time::advance(HOUR / 2).await;
        cache.put("k", "new".to_string(), HOUR).await.unwrap();

        tokio::time::advance(HOUR / 2 + Duration::from_secs(1)).await;
        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("new"));
    }
}
