//! Database operations for the Lina Optic `PostgreSQL` database.
//!
//! # Tables
//!
//! - `products` - Catalog with per-color stock and images (JSONB `colors`)
//! - `orders` / `order_items` - Customer orders and their line items
//! - `admin_users` - Dashboard authentication
//! - `contact_messages` - Contact-form submissions
//!
//! `created_at` / `updated_at` are managed by the database (`DEFAULT now()`
//! plus an update trigger), never set from application code.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p lina-optic-cli -- migrate
//! ```

pub mod admin_users;
pub mod contact_messages;
pub mod orders;
pub mod products;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use admin_users::AdminUserRepository;
pub use contact_messages::ContactMessageRepository;
pub use orders::{MonthlySales, OrderRepository};
pub use products::{ProductFilter, ProductRepository};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Create a connection pool, retrying forever with a fixed delay.
///
/// The server refuses to come up half-connected: if the database is not
/// reachable at startup, every attempt is logged and retried after
/// `retry_delay` until one succeeds.
pub async fn connect_with_retry(
    database_url: &secrecy::SecretString,
    retry_delay: Duration,
) -> PgPool {
    loop {
        match create_pool(database_url).await {
            Ok(pool) => return pool,
            Err(err) => {
                tracing::error!(
                    error = %err,
                    retry_in_secs = retry_delay.as_secs(),
                    "Database connection failed, retrying"
                );
                tokio::time::sleep(retry_delay).await;
            }
        }
    }
}
