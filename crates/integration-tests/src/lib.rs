//! Integration tests for the Lina Optic backend.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! cargo run -p lina-optic-cli -- migrate
//!
//! # Start the server
//! cargo run -p lina-optic-server
//!
//! # Run integration tests against it
//! cargo test -p lina-optic-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `API_BASE_URL` - Base URL of the running server (default: http://localhost:5000)
//! - `ADMIN_USERNAME` / `ADMIN_PASSWORD` - Credentials of an existing admin
//!   user (create one with `lina-optic-cli admin create`); tests that manage
//!   the store are skipped without them

use reqwest::Client;
use serde_json::Value;

/// Base URL of the server under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string())
}

/// Plain HTTP client.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// Log in with the admin credentials from the environment.
///
/// Returns `None` when `ADMIN_USERNAME` / `ADMIN_PASSWORD` are not set, so
/// admin tests can skip themselves gracefully.
///
/// # Panics
///
/// Panics if the login request itself fails or returns an unexpected body.
pub async fn admin_token(client: &Client) -> Option<String> {
    let username = std::env::var("ADMIN_USERNAME").ok()?;
    let password = std::env::var("ADMIN_PASSWORD").ok()?;

    let resp = client
        .post(format!("{}/api/auth/admin", base_url()))
        .json(&serde_json::json!({
            "username": username,
            "password": password,
        }))
        .send()
        .await
        .expect("Failed to call login endpoint");

    assert!(
        resp.status().is_success(),
        "admin login failed: {}",
        resp.status()
    );

    let body: Value = resp.json().await.expect("Failed to parse login response");
    Some(
        body["token"]
            .as_str()
            .expect("login response has no token")
            .to_string(),
    )
}
