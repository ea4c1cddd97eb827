//! Infrastructure layer - External systems integration
//!
//! - Database connection, migrations and repositories
//! - Cache stores (Redis, in-memory) and the best-effort cache wrapper

pub mod cache;
pub mod db;
pub mod repositories;

pub use cache::{BestEffortCache, CacheStore, MemoryCache, RedisCache, UnavailableCache};
pub use db::{Database, MigrationState, Migrator};
pub use repositories::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use cache::MockCacheStore;
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockUserRepository;
