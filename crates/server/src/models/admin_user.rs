//! Admin user models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lina_optic_core::{AdminRole, AdminUserId, Email};

/// A dashboard admin account. The password hash never leaves the db layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: AdminUserId,
    pub username: String,
    pub email: Email,
    pub role: AdminRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The authenticated admin for the current request, decoded from the
/// bearer token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    pub id: AdminUserId,
    pub username: String,
    pub role: AdminRole,
}
