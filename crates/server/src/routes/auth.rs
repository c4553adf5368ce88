//! Admin authentication route handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use lina_optic_core::AdminRole;

use crate::error::Result;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Admin login request body.
#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
}

/// Admin identity returned to the dashboard.
#[derive(Debug, Serialize)]
pub struct AdminUserSummary {
    pub username: String,
    pub role: AdminRole,
}

/// Admin login response body.
#[derive(Debug, Serialize)]
pub struct AdminLoginResponse {
    pub message: String,
    pub token: String,
    pub user: AdminUserSummary,
}

/// Log an admin into the dashboard.
///
/// Issues a one-hour bearer token. Unknown usernames and wrong passwords
/// both answer 401 with the same body.
///
/// # Errors
///
/// Returns 401 on bad credentials.
#[instrument(skip(state, request), fields(username = %request.username))]
pub async fn admin_login(
    State(state): State<AppState>,
    Json(request): Json<AdminLoginRequest>,
) -> Result<Json<AdminLoginResponse>> {
    let auth = AuthService::new(state.pool(), state.jwt());
    let (admin, token) = auth.login(&request.username, &request.password).await?;

    tracing::info!(admin_id = %admin.id, "Admin authenticated");

    Ok(Json(AdminLoginResponse {
        message: "Authentication successful".to_owned(),
        token,
        user: AdminUserSummary {
            username: admin.username,
            role: admin.role,
        },
    }))
}
