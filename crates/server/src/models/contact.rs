//! Contact-form models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lina_optic_core::{ContactMessageId, Email};

/// A stored contact-form submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: ContactMessageId,
    pub name: String,
    pub email: Email,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Incoming contact-form payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInput {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
}

impl ContactInput {
    /// Validate the payload.
    ///
    /// # Errors
    ///
    /// Returns a human-readable message describing the first failed check.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_owned());
        }
        if self.message.trim().is_empty() {
            return Err("message must not be empty".to_owned());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_name_and_message() {
        let input = ContactInput {
            name: "Amira".to_owned(),
            email: "amira@example.com".to_owned(),
            subject: None,
            message: "Avez-vous ce modèle en stock ?".to_owned(),
        };
        assert!(input.validate().is_ok());

        let blank_name = ContactInput {
            name: " ".to_owned(),
            ..input.clone()
        };
        assert!(blank_name.validate().is_err());

        let blank_message = ContactInput {
            message: String::new(),
            ..input
        };
        assert!(blank_message.validate().is_err());
    }
}
