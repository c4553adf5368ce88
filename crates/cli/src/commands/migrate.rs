//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! lina-optic-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or `DB_URL`) - `PostgreSQL` connection string

use sqlx::PgPool;
use thiserror::Error;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run all pending migrations against the configured database.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails,
/// or a migration fails to apply.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .or_else(|_| std::env::var("DB_URL"))
        .map_err(|_| MigrationError::MissingEnvVar("DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url)
        .await
        .map_err(MigrationError::Database)?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../server/migrations")
        .run(&pool)
        .await
        .map_err(MigrationError::Migration)?;

    tracing::info!("Migrations complete!");
    Ok(())
}
