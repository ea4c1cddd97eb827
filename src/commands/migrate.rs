//! Migrate command - schema management for the `users` table.

use sea_orm::DbErr;

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    // Connect without auto-running migrations for manual control
    let db = Database::connect_without_migrations(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    match args.action {
        MigrateAction::Up => {
            tracing::info!("Applying pending migrations");
            db.migrate_up().await.map_err(migration_error)?;
        }
        MigrateAction::Down => {
            tracing::info!("Rolling back last migration");
            db.migrate_down().await.map_err(migration_error)?;
        }
        MigrateAction::Status => {
            for state in db.migration_states().await.map_err(migration_error)? {
                let label = if state.applied { "applied" } else { "pending" };
                println!("{}: {}", state.name, label);
            }
            return Ok(());
        }
        MigrateAction::Fresh => {
            tracing::warn!("Dropping all tables and re-running migrations");
            db.migrate_fresh().await.map_err(migration_error)?;
        }
    }

    tracing::info!(action = ?args.action, "Migration command completed");
    Ok(())
}

fn migration_error(e: DbErr) -> AppError {
    AppError::internal(format!("Migration failed: {}", e))
}
