//! Media upload adapter. Takes a multipart file, stores it in the S3
//! bucket, and hands back the public URL the content records reference.

use aws_sdk_s3::primitives::ByteStream;
use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct UploadResponse {
    pub url: String,
}

/// POST /upload
///
/// Reads the first file field of the multipart body; other fields are
/// ignored. Returns `{url}` pointing at the stored object.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {e}")))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        if data.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty".to_string()));
        }
        let size = data.len();

        let key = object_key(&file_name);
        let mut request = state
            .s3
            .put_object()
            .bucket(&state.config.s3_bucket)
            .key(&key)
            .body(ByteStream::from(data));
        if let Some(content_type) = content_type {
            request = request.content_type(content_type);
        }
        request
            .send()
            .await
            .map_err(|e| AppError::S3(format!("Upload of {key} failed: {e}")))?;

        info!("Stored upload {key} ({size} bytes)");
        return Ok(Json(UploadResponse {
            url: format!("{}/{}", state.config.media_base_url(), key),
        }));
    }

    Err(AppError::Validation(
        "No file field in multipart payload".to_string(),
    ))
}

/// `uploads/<uuid>.<ext>`. The random name prevents collisions; the
/// original extension is kept when it looks sane.
fn object_key(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && !ext.is_empty()
                && ext.len() <= 8
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            format!("uploads/{}.{}", Uuid::new_v4(), ext.to_lowercase())
        }
        _ => format!("uploads/{}", Uuid::new_v4()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_keeps_extension() {
        let key = object_key("headshot.PNG");
        assert!(key.starts_with("uploads/"));
        assert!(key.ends_with(".png"));
    }

    #[test]
    fn test_object_key_drops_suspicious_extension() {
        assert!(!object_key("archive.tar.gz/..").contains(".."));
        let key = object_key("no-extension");
        assert!(key.starts_with("uploads/"));
        assert!(!key.contains('.'));
    }

    #[test]
    fn test_object_key_unique_per_call() {
        assert_ne!(object_key("a.png"), object_key("a.png"));
    }

    #[test]
    fn test_object_key_hidden_file_gets_no_extension() {
        // ".env" splits into an empty stem; treat it as extension-less.
        let key = object_key(".env");
        assert!(!key.ends_with(".env"));
    }
}
