use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use rentora_core::upload::{MAX_FILES_PER_BATCH, MAX_FILE_SIZE_BYTES};

use crate::handlers::upload;
use crate::state::AppState;

/// Mount `/upload` routes.
///
/// The body limit leaves headroom over the per-file cap so oversize files
/// reach the handler and get a validation error rather than a bare 413.
pub fn router() -> Router<AppState> {
    let body_limit = (MAX_FILE_SIZE_BYTES as usize + 64 * 1024) * (MAX_FILES_PER_BATCH + 1);

    Router::new()
        .route("/upload/apartment-image", post(upload::upload_image))
        .route("/upload/apartment-images", post(upload::upload_images))
        .layer(DefaultBodyLimit::max(body_limit))
}
