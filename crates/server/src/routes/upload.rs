//! Product image upload handler.
//!
//! Accepts one multipart field named `image`, stores it under the upload
//! directory with a generated filename, and returns the public URL. The
//! stored name is always `<uuid>.<ext>` so client-supplied names never
//! touch the filesystem.

use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};
use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAdmin;
use crate::state::AppState;

/// Image types the dashboard is allowed to upload.
const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Response for a stored upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub filename: String,
    pub url: String,
}

/// Store an uploaded product image.
///
/// # Errors
///
/// Returns 400 if the `image` field is missing or not an accepted image
/// type, 413 if it exceeds the configured size cap, 401 without a valid
/// admin token.
#[instrument(skip(state, multipart))]
pub async fn upload_image(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_owned();
        let content_type = field.content_type().map(ToOwned::to_owned);
        let extension = image_extension(&file_name, content_type.as_deref())?;

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("could not read upload: {e}")))?;

        if data.is_empty() {
            return Err(AppError::BadRequest("uploaded file is empty".to_owned()));
        }
        if data.len() > state.config().upload.max_bytes {
            return Err(AppError::PayloadTooLarge);
        }

        let filename = format!("{}.{extension}", Uuid::new_v4());
        let dir = &state.config().upload.dir;

        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| AppError::Internal(format!("creating upload dir: {e}")))?;
        tokio::fs::write(dir.join(&filename), &data)
            .await
            .map_err(|e| AppError::Internal(format!("writing upload: {e}")))?;

        tracing::info!(%filename, bytes = data.len(), "Image uploaded");

        return Ok((
            StatusCode::CREATED,
            Json(UploadResponse {
                url: format!("/uploads/{filename}"),
                filename,
            }),
        ));
    }

    Err(AppError::BadRequest(
        "multipart field 'image' is required".to_owned(),
    ))
}

/// Determine the stored extension from the client filename, falling back
/// to the declared content type.
fn image_extension(file_name: &str, content_type: Option<&str>) -> Result<String> {
    let extension = std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .or_else(|| {
            match content_type {
                Some("image/jpeg") => Some("jpg"),
                Some("image/png") => Some("png"),
                Some("image/webp") => Some("webp"),
                _ => None,
            }
            .map(ToOwned::to_owned)
        })
        .ok_or_else(|| AppError::BadRequest("could not determine image type".to_owned()))?;

    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(AppError::BadRequest(format!(
            "unsupported image type: {extension}"
        )));
    }

    Ok(extension)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_from_filename() {
        assert_eq!(image_extension("photo.JPG", None).unwrap(), "jpg");
        assert_eq!(image_extension("frame.webp", None).unwrap(), "webp");
        assert_eq!(
            image_extension("archive.2024.png", None).unwrap(),
            "png"
        );
    }

    #[test]
    fn test_extension_from_content_type_fallback() {
        assert_eq!(
            image_extension("blob", Some("image/jpeg")).unwrap(),
            "jpg"
        );
        assert_eq!(
            image_extension("", Some("image/webp")).unwrap(),
            "webp"
        );
    }

    #[test]
    fn test_rejects_disallowed_types() {
        assert!(image_extension("script.svg", None).is_err());
        assert!(image_extension("shell.sh", None).is_err());
        assert!(image_extension("noext", Some("application/pdf")).is_err());
        assert!(image_extension("noext", None).is_err());
    }

    #[test]
    fn test_filename_extension_wins_over_content_type() {
        // A jpg named file with a png content type stays jpg
        assert_eq!(
            image_extension("photo.jpg", Some("image/png")).unwrap(),
            "jpg"
        );
    }
}
