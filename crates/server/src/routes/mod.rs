//! HTTP route handlers for the REST API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                             - Liveness banner
//! GET    /health                       - Health check
//! GET    /health/ready                 - Readiness check (database ping)
//!
//! # Products
//! POST   /api/products/create-product  - Create product (admin)
//! GET    /api/products                 - Product listing (filterable)
//! GET    /api/products/:id             - Product detail
//! PUT    /api/products/edit/:id        - Update product (admin)
//! DELETE /api/products/:id             - Delete product (admin)
//!
//! # Orders
//! POST   /api/orders                   - Place an order
//! GET    /api/orders/email/:email      - Orders for one customer
//! GET    /api/orders                   - All orders (admin, ?status= filter)
//! PATCH  /api/orders/:id/status        - Update order status (admin)
//! DELETE /api/orders/:id               - Delete order (admin)
//!
//! # Auth
//! POST   /api/auth/admin               - Admin login, returns bearer token
//!
//! # Admin stats
//! GET    /api/admin                    - Dashboard aggregates (admin)
//!
//! # Uploads
//! POST   /api/upload                   - Multipart image upload (admin)
//! GET    /uploads/:filename            - Uploaded images (static, see main)
//!
//! # Contact
//! POST   /api/contact                  - Submit contact form
//! GET    /api/contact                  - List submissions (admin)
//! ```

pub mod auth;
pub mod contact;
pub mod orders;
pub mod products;
pub mod stats;
pub mod upload;

use axum::{
    Router,
    routing::{get, post, put},
};
use serde::Serialize;

use crate::middleware::rate_limit;
use crate::state::AppState;

/// Simple `{"message": ...}` acknowledgement body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    /// Build an acknowledgement with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/create-product", post(products::create))
        .route("/", get(products::index))
        .route("/{id}", get(products::show).delete(products::destroy))
        .route("/edit/{id}", put(products::update))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    use axum::routing::patch;

    Router::new()
        .route("/", post(orders::create).get(orders::index))
        .route("/email/{email}", get(orders::by_email))
        .route("/{id}/status", patch(orders::update_status))
        .route("/{id}", axum::routing::delete(orders::destroy))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/admin", post(auth::admin_login))
}

/// Create the admin stats router.
pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/", get(stats::index))
}

/// Create the upload routes router.
pub fn upload_routes() -> Router<AppState> {
    Router::new().route("/", post(upload::upload_image))
}

/// Create the contact routes router.
pub fn contact_routes() -> Router<AppState> {
    Router::new().route("/", post(contact::submit).get(contact::index))
}

/// Create all API routes.
///
/// Login and contact-form endpoints sit behind per-IP rate limiters.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/products", product_routes())
        .nest("/api/orders", order_routes())
        .nest(
            "/api/auth",
            auth_routes().layer(rate_limit::auth_rate_limiter()),
        )
        .nest("/api/admin", admin_routes())
        .nest("/api/upload", upload_routes())
        .nest(
            "/api/contact",
            contact_routes().layer(rate_limit::contact_rate_limiter()),
        )
}
