//! Contact-form route handlers.

use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use lina_optic_core::Email;

use super::MessageResponse;
use crate::db::ContactMessageRepository;
use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAdmin;
use crate::models::contact::{ContactInput, ContactMessage};
use crate::state::AppState;

/// Store a contact-form submission and notify the shop inbox.
///
/// The notification email is best-effort: the submission is already
/// persisted, so a send failure is logged and the client still gets a 201.
///
/// # Errors
///
/// Returns 400 if the payload fails validation or the email is invalid.
#[instrument(skip(state, input), fields(email = %input.email))]
pub async fn submit(
    State(state): State<AppState>,
    Json(input): Json<ContactInput>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    input.validate().map_err(AppError::BadRequest)?;

    let email = Email::parse(input.email.trim())
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;

    let stored = ContactMessageRepository::new(state.pool())
        .create(
            input.name.trim(),
            &email,
            input.subject.as_deref(),
            input.message.trim(),
        )
        .await?;

    tracing::info!(message_id = %stored.id, "Contact message received");

    if let Some(mailer) = state.mailer()
        && let Err(err) = mailer.send_contact_notification(&stored).await
    {
        tracing::warn!(
            error = %err,
            message_id = %stored.id,
            "Contact notification email failed"
        );
    }

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(
            "Your message has been sent successfully",
        )),
    ))
}

/// List stored contact messages, newest first (dashboard view).
///
/// # Errors
///
/// Returns 401 without a valid admin token.
pub async fn index(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<ContactMessage>>> {
    let messages = ContactMessageRepository::new(state.pool()).list().await?;
    Ok(Json(messages))
}
