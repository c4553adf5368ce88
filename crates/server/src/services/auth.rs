//! Admin authentication service.
//!
//! Verifies dashboard credentials against the database and issues short-lived
//! bearer tokens. Passwords are hashed with argon2; tokens are HS256 JWTs
//! signed with `JWT_SECRET_KEY`.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use thiserror::Error;

use lina_optic_core::{AdminRole, AdminUserId};

use crate::db::{AdminUserRepository, RepositoryError};
use crate::models::admin_user::{AdminUser, CurrentAdmin};

/// How long an issued admin token stays valid.
const TOKEN_TTL_HOURS: i64 = 1;

/// Errors that can occur during authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown username or wrong password. Deliberately not distinguished.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Bearer token is missing, malformed, or expired.
    #[error("invalid token")]
    InvalidToken,

    /// Password hashing failed.
    #[error("password hash error: {0}")]
    PasswordHash(String),

    /// Token signing failed.
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Database operation failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// JWT claims carried by admin tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Admin user id.
    pub sub: i32,
    /// Admin username, for display in the dashboard.
    pub username: String,
    /// Admin role.
    pub role: AdminRole,
    /// Issued at (unix seconds).
    pub iat: i64,
    /// Expiration (unix seconds).
    pub exp: i64,
}

impl Claims {
    /// Build claims for an admin, valid for [`TOKEN_TTL_HOURS`].
    #[must_use]
    pub fn for_admin(admin: &AdminUser) -> Self {
        let now = Utc::now();
        Self {
            sub: admin.id.as_i32(),
            username: admin.username.clone(),
            role: admin.role,
            iat: now.timestamp(),
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        }
    }

    /// The admin identity these claims describe.
    #[must_use]
    pub fn current_admin(&self) -> CurrentAdmin {
        CurrentAdmin {
            id: AdminUserId::new(self.sub),
            username: self.username.clone(),
            role: self.role,
        }
    }
}

/// Signing and verification keys derived from the configured secret.
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtKeys {
    /// Build keys from the configured secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            validation: Validation::default(),
        }
    }

    /// Sign claims into a compact token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Token` if signing fails.
    pub fn encode(&self, claims: &Claims) -> Result<String, AuthError> {
        Ok(jsonwebtoken::encode(
            &Header::default(),
            claims,
            &self.encoding,
        )?)
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` for any signature, structure, or
    /// expiry problem.
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidToken)
    }
}

/// Authentication service.
pub struct AuthService<'a> {
    admins: AdminUserRepository<'a>,
    jwt: &'a JwtKeys,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, jwt: &'a JwtKeys) -> Self {
        Self {
            admins: AdminUserRepository::new(pool),
            jwt,
        }
    }

    /// Log an admin in with username and password, returning the account
    /// and a freshly signed token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the username is unknown or
    /// the password is wrong.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(AdminUser, String), AuthError> {
        let (admin, password_hash) = self
            .admins
            .get_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        let token = self.jwt.encode(&Claims::for_admin(&admin))?;
        Ok((admin, token))
    }
}

/// Hash a password with argon2 and a random salt.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::PasswordHash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored argon2 hash.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` if the password doesn't match,
/// `AuthError::PasswordHash` if the stored hash is unparseable.
pub fn verify_password(password: &str, password_hash: &str) -> Result<(), AuthError> {
    let parsed =
        PasswordHash::new(password_hash).map_err(|e| AuthError::PasswordHash(e.to_string()))?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use lina_optic_core::Email;

    use super::*;

    fn test_admin() -> AdminUser {
        AdminUser {
            id: AdminUserId::new(1),
            username: "admin".to_owned(),
            email: Email::parse("admin@linaoptic.com").unwrap(),
            role: AdminRole::Admin,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn test_keys() -> JwtKeys {
        JwtKeys::new(&SecretString::from("kD93!xQz7@mW2$vB8&nF4^jH6*pL0(rT".to_owned()))
    }

    #[test]
    fn test_hash_and_verify_password() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(verify_password("correct horse battery staple", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong password", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(AuthError::PasswordHash(_))
        ));
    }

    #[test]
    fn test_token_roundtrip() {
        let keys = test_keys();
        let claims = Claims::for_admin(&test_admin());

        let token = keys.encode(&claims).unwrap();
        let decoded = keys.decode(&token).unwrap();

        assert_eq!(decoded.sub, 1);
        assert_eq!(decoded.username, "admin");
        assert_eq!(decoded.role, AdminRole::Admin);
        assert!(decoded.exp > decoded.iat);
    }

    #[test]
    fn test_decode_rejects_wrong_secret() {
        let keys = test_keys();
        let other = JwtKeys::new(&SecretString::from("zY5#wV1@qN8$kM3&hJ7^fD2*bG9(xC4".to_owned()));

        let token = keys.encode(&Claims::for_admin(&test_admin())).unwrap();
        assert!(matches!(
            other.decode(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_decode_rejects_tampered_token() {
        let keys = test_keys();
        let mut token = keys.encode(&Claims::for_admin(&test_admin())).unwrap();
        token.push('x');
        assert!(matches!(keys.decode(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_claims_current_admin() {
        let claims = Claims::for_admin(&test_admin());
        let current = claims.current_admin();
        assert_eq!(current.id, AdminUserId::new(1));
        assert_eq!(current.username, "admin");
    }
}
