//! User service - cached access to the user store.
//!
//! Reads go through the cache (`user:<id>`, `user:email:<hash>`,
//! `users:all`) and fall back to the store on a miss. Writes hit the store
//! first, then maintain the cache on a best-effort basis: a cache failure
//! is logged and never fails the write.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{
    normalize_email, CreateUser, NewUser, Password, UpdateUser, User, UserChanges,
};
use crate::errors::{AppResult, OptionExt};
use crate::infra::cache::{user_email_key, user_key, BestEffortCache, ALL_USERS_KEY};
use crate::infra::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Hash the password, persist the user and prime the per-user cache entries.
    async fn create_user(&self, input: CreateUser) -> AppResult<User>;

    /// Read-through lookup by id. Fails with `NotFound` when no record exists.
    async fn get_user(&self, id: i32) -> AppResult<User>;

    /// Read-through lookup by email. A missing user is `Ok(None)`.
    async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Read-through list of every user.
    async fn get_all_users(&self) -> AppResult<Vec<User>>;

    /// Apply a partial update and refresh the affected cache entries.
    async fn update_user(&self, id: i32, input: UpdateUser) -> AppResult<User>;
}

/// [`UserService`] backed by a [`UserRepository`] and a [`BestEffortCache`].
pub struct UserCacheService {
    repo: Arc<dyn UserRepository>,
    cache: BestEffortCache,
}

impl UserCacheService {
    pub fn new(repo: Arc<dyn UserRepository>, cache: BestEffortCache) -> Self {
        Self { repo, cache }
    }

    /// Write both per-user entries.
    async fn cache_user(&self, user: &User) {
        self.cache.put(&user_key(user.id), user).await;
        self.cache.put(&user_email_key(&user.email), user).await;
    }

    /// Reload a user from the store (bypassing the cache) and re-cache it.
    async fn refresh(&self, id: i32) {
        match self.repo.find_by_id(id).await {
            Ok(Some(user)) => self.cache_user(&user).await,
            Ok(None) => tracing::warn!(user_id = id, "User vanished before cache refresh"),
            Err(e) => tracing::warn!(user_id = id, error = %e, "Cache refresh failed"),
        }
    }
}

#[async_trait]
impl UserService for UserCacheService {
    async fn create_user(&self, input: CreateUser) -> AppResult<User> {
        let password = Password::new(&input.password)?;
        let new_user = NewUser {
            name: input.name,
            email: normalize_email(&input.email),
            password_hash: password.into_string(),
        };

        let user = match self.repo.create(new_user).await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "User creation failed");
                return Err(e);
            }
        };

        self.cache_user(&user).await;
        self.cache.forget(ALL_USERS_KEY).await;

        tracing::info!(user_id = user.id, "User created");
        Ok(user)
    }

    async fn get_user(&self, id: i32) -> AppResult<User> {
        let repo = self.repo.clone();

        self.cache
            .remember(&user_key(id), move || async move {
                repo.find_by_id(id).await?.ok_or_not_found()
            })
            .await
    }

    async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let email = normalize_email(email);
        let key = user_email_key(&email);

        if let Some(user) = self.cache.get::<User>(&key).await {
            return Ok(Some(user));
        }

        // Absence is a valid answer and is not cached
        let user = self.repo.find_by_email(&email).await?;
        if let Some(ref user) = user {
            self.cache.put(&key, user).await;
        }
        Ok(user)
    }

    async fn get_all_users(&self) -> AppResult<Vec<User>> {
        let repo = self.repo.clone();

        self.cache
            .remember(ALL_USERS_KEY, move || async move { repo.find_all().await })
            .await
    }

    async fn update_user(&self, id: i32, input: UpdateUser) -> AppResult<User> {
        let current = self.get_user(id).await?;

        let password_hash = match input.password {
            Some(plain) => Some(Password::new(&plain)?.into_string()),
            None => None,
        };
        let changes = UserChanges {
            name: input.name,
            email: input.email.as_deref().map(normalize_email),
            password_hash,
        };

        let old_email = current.email;
        let updated = match self.repo.update(id, changes).await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(user_id = id, error = %e, "User update failed");
                return Err(e);
            }
        };

        // The new email's entry is overwritten by the refresh below
        self.cache.forget(&user_key(id)).await;
        if updated.email != old_email {
            self.cache.forget(&user_email_key(&old_email)).await;
        }

        self.refresh(id).await;
        self.cache.forget(ALL_USERS_KEY).await;

        tracing::info!(user_id = id, "User updated");
        Ok(updated)
    }
}
