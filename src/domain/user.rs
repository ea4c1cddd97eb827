//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// User domain entity
///
/// The password hash is never serialized, so it never reaches the cache or a
/// response body. It is `Some` only on records read from the store; a user
/// served from the cache has `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(skip)]
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Canonical form of an email address used for storage, lookups and cache keys.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Insert payload handed to the store (password already hashed).
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Partial update handed to the store. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

/// User creation data transfer object
#[derive(Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    /// User display name
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 255,
        message = "The name field is required and may not be greater than 255 characters."
    ))]
    #[schema(example = "Ann")]
    pub name: String,
    /// User email address
    #[serde(default)]
    #[validate(
        email(message = "The email must be a valid email address."),
        length(max = 255, message = "The email may not be greater than 255 characters.")
    )]
    #[schema(example = "ann@example.com")]
    pub email: String,
    /// User password (minimum 8 characters)
    #[serde(default)]
    #[validate(length(min = 8, message = "The password must be at least 8 characters."))]
    #[schema(example = "secret123", min_length = 8)]
    pub password: String,
}

// Don't expose the plaintext password in debug output
impl std::fmt::Debug for CreateUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// User update data transfer object (every field optional)
#[derive(Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    /// New display name
    #[validate(length(
        min = 1,
        max = 255,
        message = "The name field is required and may not be greater than 255 characters."
    ))]
    #[schema(example = "Ann Smith")]
    pub name: Option<String>,
    /// New email address
    #[validate(
        email(message = "The email must be a valid email address."),
        length(max = 255, message = "The email may not be greater than 255 characters.")
    )]
    #[schema(example = "ann2@example.com")]
    pub email: Option<String>,
    /// New password (minimum 8 characters)
    #[validate(length(min = 8, message = "The password must be at least 8 characters."))]
    #[schema(example = "new-secret-123", min_length = 8)]
    pub password: Option<String>,
}

impl std::fmt::Debug for UpdateUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = 1)]
    pub id: i32,
    /// User display name
    #[schema(example = "Ann")]
    pub name: String,
    /// User email address
    #[schema(example = "ann@example.com")]
    pub email: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
