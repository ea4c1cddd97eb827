//! Application settings loaded from environment variables.

use std::env;
use std::time::Duration;

use super::constants::{
    CACHE_DRIVER_MEMORY, DEFAULT_CACHE_TTL_SECONDS, DEFAULT_DATABASE_URL, DEFAULT_REDIS_URL,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, MAX_CACHE_TTL_SECONDS,
};

/// Which cache backend the service is wired to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheDriver {
    Redis,
    Memory,
}

impl From<&str> for CacheDriver {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            CACHE_DRIVER_MEMORY => CacheDriver::Memory,
            _ => CacheDriver::Redis,
        }
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub cache_driver: CacheDriver,
    pub cache_ttl_seconds: u64,
    pub server_host: String,
    pub server_port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("redis_url", &"[REDACTED]")
            .field("cache_driver", &self.cache_driver)
            .field("cache_ttl_seconds", &self.cache_ttl_seconds)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            redis_url: DEFAULT_REDIS_URL.to_string(),
            cache_driver: CacheDriver::Redis,
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            redis_url: env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            cache_driver: env::var("CACHE_DRIVER")
                .map(|v| CacheDriver::from(v.as_str()))
                .unwrap_or(defaults.cache_driver),
            cache_ttl_seconds: parse_cache_ttl(env::var("CACHE_TTL_SECONDS").ok().as_deref()),
            server_host: env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
        }
    }

    /// Cache entry lifetime, never above [`MAX_CACHE_TTL_SECONDS`].
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds.min(MAX_CACHE_TTL_SECONDS))
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Zero and unparsable values fall back to the default; large values are capped.
fn parse_cache_ttl(raw: Option<&str>) -> u64 {
    match raw.and_then(|v| v.trim().parse::<u64>().ok()) {
        Some(0) | None => DEFAULT_CACHE_TTL_SECONDS,
        Some(ttl) if ttl > MAX_CACHE_TTL_SECONDS => {
            tracing::warn!(
                requested = ttl,
                max = MAX_CACHE_TTL_SECONDS,
                "CACHE_TTL_SECONDS too large, capping"
            );
            MAX_CACHE_TTL_SECONDS
        }
        Some(ttl) => ttl,
    }
}
