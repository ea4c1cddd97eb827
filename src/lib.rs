//! User Cache API - user management over a relational store and a
//! read-through cache.
//!
//! # Architecture Layers
//!
//! - **cli** / **commands**: command-line entry points (`serve`, `migrate`)
//! - **config**: environment configuration and constants
//! - **domain**: the `User` entity, DTOs, password hashing, validation
//! - **services**: `UserCacheService`, which owns cache population and
//!   invalidation ordering
//! - **infra**: SeaORM store, cache stores (Redis, memory), best-effort cache
//! - **api**: axum handlers, extractors and routes
//! - **types**: response envelopes
//! - **errors**: centralized error handling
//!
//! # Cache keys
//!
//! | key                        | value         |
//! |----------------------------|---------------|
//! | `user:<id>`                | `User`        |
//! | `user:email:<sha256>`      | `User`        |
//! | `users:all`                | `Vec<User>`   |

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Password, User};
pub use errors::{AppError, AppResult};
pub use services::{UserCacheService, UserService};
