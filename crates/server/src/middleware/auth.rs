//! Admin authentication extractor.
//!
//! Dashboard requests carry `Authorization: Bearer <jwt>`; handlers that
//! manage the store take a [`RequireAdmin`] argument and get the verified
//! admin identity, or the request is rejected with 401 before the handler
//! runs.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::error::AppError;
use crate::models::admin_user::CurrentAdmin;
use crate::state::AppState;

/// Extractor that requires a valid admin bearer token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdmin(admin): RequireAdmin,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.username)
/// }
/// ```
pub struct RequireAdmin(pub CurrentAdmin);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_owned()))?;

        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Unauthorized("Expected a bearer token".to_owned()))?;

        let claims = state.jwt().decode(token)?;

        Ok(Self(claims.current_admin()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use chrono::Utc;
    use lina_optic_core::{AdminRole, AdminUserId, Email};

    use super::*;
    use crate::services::auth::Claims;
    use crate::state::test_support::test_state;

    async fn extract(state: &AppState, auth_header: Option<&str>) -> Result<RequireAdmin, AppError> {
        let mut builder = Request::builder().uri("/api/admin");
        if let Some(value) = auth_header {
            builder = builder.header(AUTHORIZATION, value);
        }
        let request = builder.body(Body::empty()).unwrap();
        let (mut parts, _) = request.into_parts();
        RequireAdmin::from_request_parts(&mut parts, state).await
    }

    fn valid_token(state: &AppState) -> String {
        let admin = crate::models::admin_user::AdminUser {
            id: AdminUserId::new(1),
            username: "admin".to_owned(),
            email: Email::parse("admin@linaoptic.com").unwrap(),
            role: AdminRole::Admin,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        state.jwt().encode(&Claims::for_admin(&admin)).unwrap()
    }

    #[tokio::test]
    async fn test_accepts_valid_bearer_token() {
        let state = test_state();
        let token = valid_token(&state);

        let result = extract(&state, Some(&format!("Bearer {token}"))).await;
        let RequireAdmin(admin) = result.unwrap();
        assert_eq!(admin.username, "admin");
        assert_eq!(admin.id, AdminUserId::new(1));
    }

    #[tokio::test]
    async fn test_rejects_missing_header() {
        let state = test_state();
        assert!(matches!(
            extract(&state, None).await,
            Err(AppError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_rejects_non_bearer_scheme() {
        let state = test_state();
        assert!(matches!(
            extract(&state, Some("Basic dXNlcjpwYXNz")).await,
            Err(AppError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_rejects_garbage_token() {
        let state = test_state();
        assert!(matches!(
            extract(&state, Some("Bearer not.a.token")).await,
            Err(AppError::Auth(_))
        ));
    }
}
