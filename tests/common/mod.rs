//! Shared fakes for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use user_cache_api::domain::{NewUser, User, UserChanges};
use user_cache_api::errors::{AppError, AppResult};
use user_cache_api::infra::{
    BestEffortCache, CacheStore, MemoryCache, UnavailableCache, UserRepository,
};
use user_cache_api::services::UserCacheService;

pub const TTL: Duration = Duration::from_secs(3600);

/// Per-method call counters.
#[derive(Default)]
pub struct StoreCalls {
    pub create: AtomicUsize,
    pub find_by_id: AtomicUsize,
    pub find_by_email: AtomicUsize,
    pub find_all: AtomicUsize,
    pub update: AtomicUsize,
}

impl StoreCalls {
    pub fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

/// Vec-backed store enforcing unique emails, with sequential ids from 1.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    pub calls: StoreCalls,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert directly, bypassing the service and its cache maintenance.
    pub fn insert_raw(&self, name: &str, email: &str) -> User {
        let mut users = self.users.lock().unwrap();
        let now = Utc::now();
        let user = User {
            id: users.len() as i32 + 1,
            name: name.to_string(),
            email: email.to_string(),
            password_hash: Some("$argon2id$seeded".to_string()),
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        user
    }

    pub fn stored(&self, id: i32) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        self.calls.create.fetch_add(1, Ordering::SeqCst);
        let mut users = self.users.lock().unwrap();

        if users.iter().any(|u| u.email == new_user.email) {
            return Err(AppError::conflict("Email"));
        }

        let now = Utc::now();
        let user = User {
            id: users.len() as i32 + 1,
            name: new_user.name,
            email: new_user.email,
            password_hash: Some(new_user.password_hash),
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        self.calls.find_by_id.fetch_add(1, Ordering::SeqCst);
        Ok(self.stored(id))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.calls.find_by_email.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        self.calls.find_all.fetch_add(1, Ordering::SeqCst);
        Ok(self.users.lock().unwrap().clone())
    }

    async fn update(&self, id: i32, changes: UserChanges) -> AppResult<User> {
        self.calls.update.fetch_add(1, Ordering::SeqCst);
        let mut users = self.users.lock().unwrap();

        if let Some(ref email) = changes.email {
            if users.iter().any(|u| u.id != id && &u.email == email) {
                return Err(AppError::conflict("Email"));
            }
        }

        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AppError::NotFound)?;

        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(password_hash) = changes.password_hash {
            user.password_hash = Some(password_hash);
        }
        user.updated_at = Utc::now();

        Ok(user.clone())
    }
}

/// Cache where every operation fails, as after a lost Redis connection.
pub fn failing_cache() -> Arc<dyn CacheStore> {
    Arc::new(UnavailableCache::new("connection refused"))
}

/// Service wired to a fresh in-memory store and the given cache.
pub fn service_with(
    cache: Arc<dyn CacheStore>,
) -> (UserCacheService, Arc<InMemoryUserRepository>) {
    let repo = Arc::new(InMemoryUserRepository::new());
    let service = UserCacheService::new(repo.clone(), BestEffortCache::new(cache, TTL));
    (service, repo)
}

/// Service wired to a fresh in-memory store and a memory cache.
pub fn service() -> (UserCacheService, Arc<InMemoryUserRepository>, Arc<MemoryCache>) {
    let cache = Arc::new(MemoryCache::new());
    let (service, repo) = service_with(cache.clone());
    (service, repo, cache)
}
