//! Integration tests for admin auth, stats, uploads, contact, and CORS.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p lina-optic-server)
//! - `ADMIN_USERNAME` / `ADMIN_PASSWORD` for the admin tests
//!
//! Run with: cargo test -p lina-optic-integration-tests -- --ignored

use reqwest::{StatusCode, multipart};
use serde_json::{Value, json};

use lina_optic_integration_tests::{admin_token, base_url, client};

// ============================================================================
// Auth
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_login_with_bad_credentials_is_401() {
    let client = client();

    let resp = client
        .post(format!("{}/api/auth/admin", base_url()))
        .json(&json!({
            "username": "nobody",
            "password": "definitely-wrong"
        }))
        .send()
        .await
        .expect("Failed to call login endpoint");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.expect("Failed to parse body");
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
#[ignore = "Requires running server and admin credentials"]
async fn test_login_returns_token_and_user() {
    let client = client();
    let Some(token) = admin_token(&client).await else {
        eprintln!("ADMIN_USERNAME / ADMIN_PASSWORD not set, skipping");
        return;
    };

    // Token is a three-part JWT
    assert_eq!(token.split('.').count(), 3);
}

// ============================================================================
// Admin stats
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_stats_require_admin_token() {
    let client = client();

    let resp = client
        .get(format!("{}/api/admin", base_url()))
        .send()
        .await
        .expect("Failed to call stats endpoint");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = client
        .get(format!("{}/api/admin", base_url()))
        .bearer_auth("not.a.token")
        .send()
        .await
        .expect("Failed to call stats endpoint");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running server and admin credentials"]
async fn test_stats_shape() {
    let client = client();
    let Some(token) = admin_token(&client).await else {
        eprintln!("ADMIN_USERNAME / ADMIN_PASSWORD not set, skipping");
        return;
    };

    let resp = client
        .get(format!("{}/api/admin", base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to call stats endpoint");
    assert_eq!(resp.status(), StatusCode::OK);

    let stats: Value = resp.json().await.expect("Failed to parse body");
    assert!(stats["totalOrders"].is_i64());
    assert!(stats["totalProducts"].is_i64());
    assert!(stats["trendingProducts"].is_i64());
    assert!(stats["totalSales"].is_string());
    assert!(stats["monthlySales"].is_array());
}

// ============================================================================
// Uploads
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and admin credentials"]
async fn test_upload_and_fetch_image() {
    let client = client();
    let base_url = base_url();
    let Some(token) = admin_token(&client).await else {
        eprintln!("ADMIN_USERNAME / ADMIN_PASSWORD not set, skipping");
        return;
    };

    // Smallest possible valid-enough PNG payload for a storage test
    let png_bytes: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x00,
    ];
    let form = multipart::Form::new().part(
        "image",
        multipart::Part::bytes(png_bytes.to_vec())
            .file_name("frame.png")
            .mime_str("image/png")
            .expect("valid mime"),
    );

    let resp = client
        .post(format!("{base_url}/api/upload"))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await
        .expect("Failed to upload image");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = resp.json().await.expect("Failed to parse body");
    let url = body["url"].as_str().expect("upload response has no url");
    assert!(url.starts_with("/uploads/"));
    assert!(url.ends_with(".png"));

    // The stored file is served statically
    let resp = client
        .get(format!("{base_url}{url}"))
        .send()
        .await
        .expect("Failed to fetch uploaded image");
    assert_eq!(resp.status(), StatusCode::OK);
    let served = resp.bytes().await.expect("Failed to read image bytes");
    assert_eq!(served.as_ref(), png_bytes);
}

#[tokio::test]
#[ignore = "Requires running server and admin credentials"]
async fn test_upload_rejects_unsupported_type() {
    let client = client();
    let Some(token) = admin_token(&client).await else {
        eprintln!("ADMIN_USERNAME / ADMIN_PASSWORD not set, skipping");
        return;
    };

    let form = multipart::Form::new().part(
        "image",
        multipart::Part::bytes(b"#!/bin/sh".to_vec()).file_name("script.sh"),
    );

    let resp = client
        .post(format!("{}/api/upload", base_url()))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await
        .expect("Failed to call upload endpoint");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Contact form
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_contact_submit_and_validation() {
    let client = client();
    let base_url = base_url();

    let resp = client
        .post(format!("{base_url}/api/contact"))
        .json(&json!({
            "name": "Amira",
            "email": "amira@example.com",
            "subject": "Prise de rendez-vous",
            "message": "Avez-vous ce modèle en stock ?"
        }))
        .send()
        .await
        .expect("Failed to submit contact form");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("Failed to parse body");
    assert!(body["message"].is_string());

    // Blank message is rejected
    let resp = client
        .post(format!("{base_url}/api/contact"))
        .json(&json!({
            "name": "Amira",
            "email": "amira@example.com",
            "message": ""
        }))
        .send()
        .await
        .expect("Failed to call contact endpoint");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// CORS
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_cors_allows_listed_origin_only() {
    let client = client();
    let base_url = base_url();

    // Listed origin (local dev default) is echoed back with credentials
    let resp = client
        .get(format!("{base_url}/api/products"))
        .header("Origin", "http://localhost:5173")
        .send()
        .await
        .expect("Failed to call products endpoint");
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:5173")
    );
    assert_eq!(
        resp.headers()
            .get("access-control-allow-credentials")
            .and_then(|v| v.to_str().ok()),
        Some("true")
    );

    // Unlisted origin gets no CORS headers
    let resp = client
        .get(format!("{base_url}/api/products"))
        .header("Origin", "https://evil.example")
        .send()
        .await
        .expect("Failed to call products endpoint");
    assert!(resp.headers().get("access-control-allow-origin").is_none());
}
