//! Contact message repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use lina_optic_core::{ContactMessageId, Email};

use super::RepositoryError;
use crate::models::contact::ContactMessage;

/// Columns selected for every contact-message read, in row order.
const MESSAGE_COLUMNS: &str = "id, name, email, subject, body, created_at";

#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    id: ContactMessageId,
    name: String,
    email: Email,
    subject: Option<String>,
    body: String,
    created_at: DateTime<Utc>,
}

impl From<MessageRow> for ContactMessage {
    fn from(row: MessageRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            subject: row.subject,
            message: row.body,
            created_at: row.created_at,
        }
    }
}

/// Repository for contact message database operations.
pub struct ContactMessageRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContactMessageRepository<'a> {
    /// Create a new contact message repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Store a submitted message.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        name: &str,
        email: &Email,
        subject: Option<&str>,
        body: &str,
    ) -> Result<ContactMessage, RepositoryError> {
        let row = sqlx::query_as::<_, MessageRow>(&format!(
            "INSERT INTO contact_messages (name, email, subject, body) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {MESSAGE_COLUMNS}"
        ))
        .bind(name)
        .bind(email)
        .bind(subject)
        .bind(body)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// All stored messages, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<ContactMessage>, RepositoryError> {
        let rows = sqlx::query_as::<_, MessageRow>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM contact_messages ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(ContactMessage::from).collect())
    }
}
