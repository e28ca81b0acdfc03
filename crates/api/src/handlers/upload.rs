//! Multipart image upload handlers.
//!
//! All parts are read and validated before any byte is persisted, so a
//! rejected batch leaves nothing on disk.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use rentora_core::upload::{stored_name, validate_batch};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct BatchUploadResponse {
    pub urls: Vec<String>,
}

/// POST /api/v1/upload/apartment-image
///
/// Single-file upload; expects one `image` part.
pub async fn upload_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<UploadResponse>)> {
    let mut files = collect_files(multipart, "image").await?;
    if files.len() != 1 {
        return Err(AppError::BadRequest(
            "Expected exactly one 'image' file".to_string(),
        ));
    }

    let (filename, bytes) = files.remove(0);
    validate_batch(&[(filename.clone(), bytes.len() as u64)]).map_err(AppError::Core)?;

    let name = stored_name(&filename);
    let url = state
        .upload_store
        .store(&name, &bytes)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    tracing::info!(%filename, %url, "Stored listing image");
    Ok((StatusCode::CREATED, Json(UploadResponse { url })))
}

/// POST /api/v1/upload/apartment-images
///
/// Batch upload; expects up to ten `images` parts. Validation is atomic:
/// one bad file rejects the entire batch.
pub async fn upload_images(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<BatchUploadResponse>)> {
    let files = collect_files(multipart, "images").await?;

    let manifest: Vec<(String, u64)> = files
        .iter()
        .map(|(name, bytes)| (name.clone(), bytes.len() as u64))
        .collect();
    validate_batch(&manifest).map_err(AppError::Core)?;

    let mut urls = Vec::with_capacity(files.len());
    for (filename, bytes) in &files {
        let name = stored_name(filename);
        let url = state
            .upload_store
            .store(&name, bytes)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;
        urls.push(url);
    }

    tracing::info!(count = urls.len(), "Stored listing image batch");
    Ok((StatusCode::CREATED, Json(BatchUploadResponse { urls })))
}

/// Drain the multipart stream, keeping parts under `field`.
async fn collect_files(
    mut multipart: Multipart,
    field: &str,
) -> Result<Vec<(String, Vec<u8>)>, AppError> {
    let mut files = Vec::new();
    while let Some(part) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        if part.name() != Some(field) {
            continue;
        }
        let filename = part
            .file_name()
            .ok_or_else(|| AppError::BadRequest("File part is missing a filename".to_string()))?
            .to_string();
        let bytes = part
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read file part: {e}")))?;
        files.push((filename, bytes.to_vec()));
    }
    Ok(files)
}
