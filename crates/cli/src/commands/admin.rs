//! Admin user management commands.

use secrecy::SecretString;

use lina_optic_core::{AdminRole, Email};
use lina_optic_server::db::{self, AdminUserRepository};
use lina_optic_server::services::auth::hash_password;

/// Create an admin user with an argon2-hashed password.
///
/// # Errors
///
/// Returns an error if environment variables are missing, the inputs are
/// invalid, or the username is already taken.
pub async fn create(
    username: &str,
    email: &str,
    password: &str,
    role: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .or_else(|_| std::env::var("DB_URL"))
        .map(SecretString::from)
        .map_err(|_| "DATABASE_URL not set")?;

    let email = Email::parse(email)?;
    let role: AdminRole = role
        .parse()
        .map_err(|e: String| format!("invalid --role: {e}"))?;

    if password.len() < 8 {
        return Err("password must be at least 8 characters".into());
    }
    let password_hash = hash_password(password)?;

    let pool = db::create_pool(&database_url).await?;

    let user = AdminUserRepository::new(&pool)
        .create(username, &email, &password_hash, role)
        .await?;

    tracing::info!(
        id = %user.id,
        username = %user.username,
        role = %user.role,
        "Admin user created"
    );
    Ok(())
}
