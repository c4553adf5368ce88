//! Integration tests for the product API.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p lina-optic-server)
//! - `ADMIN_USERNAME` / `ADMIN_PASSWORD` for the management tests
//!
//! Run with: cargo test -p lina-optic-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use lina_optic_integration_tests::{admin_token, base_url, client};

/// A unique product payload so repeated runs don't collide.
fn test_product(marker: &str) -> Value {
    json!({
        "title": format!("Test Frame {marker}"),
        "description": "Integration test product",
        "brand": "TestBrand",
        "mainCategory": "femmes",
        "subCategory": "optique",
        "trending": false,
        "newPrice": "149.00",
        "colors": [
            {"colorName": {"fr": "Noir"}, "images": [], "stock": 3},
            {"colorName": {"fr": "Rouge"}, "images": [], "stock": 1}
        ]
    })
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_health_endpoints() {
    let client = client();
    let base_url = base_url();

    let resp = client
        .get(format!("{base_url}/health"))
        .send()
        .await
        .expect("Failed to call health endpoint");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base_url}/"))
        .send()
        .await
        .expect("Failed to call root endpoint");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("running"));
}

// ============================================================================
// Listing & Filters
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_product_list_is_json_array() {
    let client = client();

    let resp = client
        .get(format!("{}/api/products", base_url()))
        .send()
        .await
        .expect("Failed to list products");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse body");
    assert!(body.is_array());
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_product_list_filters() {
    let client = client();
    let base_url = base_url();

    // Category filter
    let resp = client
        .get(format!("{base_url}/api/products?mainCategory=femmes"))
        .send()
        .await
        .expect("Failed to get filtered products");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse body");
    for product in body.as_array().expect("expected array") {
        assert_eq!(product["mainCategory"], "femmes");
    }

    // Search + paging combined
    let resp = client
        .get(format!("{base_url}/api/products?q=frame&limit=5"))
        .send()
        .await
        .expect("Failed to search products");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse body");
    assert!(body.as_array().expect("expected array").len() <= 5);
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_product_show_unknown_id_is_404() {
    let client = client();

    let resp = client
        .get(format!("{}/api/products/999999999", base_url()))
        .send()
        .await
        .expect("Failed to get product");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.expect("Failed to parse body");
    assert!(body["message"].is_string());
}

// ============================================================================
// Management (admin)
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and admin credentials"]
async fn test_product_create_requires_admin_token() {
    let client = client();

    let resp = client
        .post(format!("{}/api/products/create-product", base_url()))
        .json(&test_product("unauthorized"))
        .send()
        .await
        .expect("Failed to call create endpoint");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running server and admin credentials"]
async fn test_product_crud_lifecycle() {
    let client = client();
    let base_url = base_url();
    let Some(token) = admin_token(&client).await else {
        eprintln!("ADMIN_USERNAME / ADMIN_PASSWORD not set, skipping");
        return;
    };

    let marker = uuid::Uuid::new_v4().to_string();

    // Create
    let resp = client
        .post(format!("{base_url}/api/products/create-product"))
        .bearer_auth(&token)
        .json(&test_product(&marker))
        .send()
        .await
        .expect("Failed to create product");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = resp.json().await.expect("Failed to parse body");
    let id = created["id"].as_i64().expect("created product has no id");
    assert_eq!(created["brand"], "TestBrand");
    assert_eq!(created["colors"].as_array().expect("colors").len(), 2);

    // The dashboard search finds it by title
    let resp = client
        .get(format!("{base_url}/api/products?q={marker}"))
        .send()
        .await
        .expect("Failed to search products");
    let found: Value = resp.json().await.expect("Failed to parse body");
    assert_eq!(found.as_array().expect("expected array").len(), 1);

    // Update
    let mut updated_payload = test_product(&marker);
    updated_payload["newPrice"] = json!("129.00");
    updated_payload["trending"] = json!(true);
    let resp = client
        .put(format!("{base_url}/api/products/edit/{id}"))
        .bearer_auth(&token)
        .json(&updated_payload)
        .send()
        .await
        .expect("Failed to update product");
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = resp.json().await.expect("Failed to parse body");
    assert_eq!(updated["newPrice"], "129.00");
    assert_eq!(updated["trending"], true);

    // Delete
    let resp = client
        .delete(format!("{base_url}/api/products/{id}"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to delete product");
    assert_eq!(resp.status(), StatusCode::OK);

    // Gone
    let resp = client
        .get(format!("{base_url}/api/products/{id}"))
        .send()
        .await
        .expect("Failed to get product");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running server and admin credentials"]
async fn test_product_create_rejects_invalid_payload() {
    let client = client();
    let Some(token) = admin_token(&client).await else {
        eprintln!("ADMIN_USERNAME / ADMIN_PASSWORD not set, skipping");
        return;
    };

    let mut payload = test_product("invalid");
    payload["newPrice"] = json!("0");

    let resp = client
        .post(format!("{}/api/products/create-product", base_url()))
        .bearer_auth(&token)
        .json(&payload)
        .send()
        .await
        .expect("Failed to call create endpoint");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
