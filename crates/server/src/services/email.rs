//! Email service for contact-form notifications.
//!
//! Uses SMTP via lettre for delivery. Sending is best-effort: the message is
//! already persisted when this runs, so a failed send is logged and dropped.

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::header::ContentType,
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::ContactEmailConfig;
use crate::models::contact::ContactMessage;

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}

/// Email service for shop notifications.
#[derive(Clone)]
pub struct EmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
    inbox_address: String,
}

impl EmailService {
    /// Create a new email service from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the SMTP relay cannot be configured.
    pub fn new(config: &ContactEmailConfig) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
            inbox_address: config.inbox_address.clone(),
        })
    }

    /// Forward a contact-form submission to the shop inbox.
    ///
    /// # Errors
    ///
    /// Returns error if the message cannot be built or sent.
    pub async fn send_contact_notification(
        &self,
        message: &ContactMessage,
    ) -> Result<(), EmailError> {
        let subject = match message.subject.as_deref() {
            Some(s) if !s.trim().is_empty() => format!("[Contact] {s}"),
            _ => format!("[Contact] Message de {}", message.name),
        };

        let body = format!(
            "Nouveau message via le formulaire de contact\n\n\
             Nom:   {}\n\
             Email: {}\n\n\
             {}\n",
            message.name, message.email, message.message
        );

        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(self.from_address.clone()))?,
            )
            .reply_to(
                message
                    .email
                    .as_str()
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(message.email.to_string()))?,
            )
            .to(self
                .inbox_address
                .parse()
                .map_err(|_| EmailError::InvalidAddress(self.inbox_address.clone()))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)?;

        self.mailer.send(email).await?;
        Ok(())
    }
}
