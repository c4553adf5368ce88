//! CORS layer restricted to the configured origin allow-list.
//!
//! The SPA is served from its own origin (Vite dev server locally, the
//! hosted frontend in production), so every browser call is cross-origin.
//! Origins on the allow-list are echoed back with credentials enabled;
//! anything else gets no CORS headers and the browser blocks the response.

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Whether `origin` is on the allow-list (exact match).
#[must_use]
pub fn origin_allowed(allowed: &[String], origin: &str) -> bool {
    allowed.iter().any(|a| a == origin)
}

/// Build the CORS layer for the API.
#[must_use]
pub fn cors_layer(allowed_origins: Vec<String>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _request_parts| {
                origin
                    .to_str()
                    .is_ok_and(|o| origin_allowed(&allowed_origins, o))
            },
        ))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::AUTHORIZATION])
}
