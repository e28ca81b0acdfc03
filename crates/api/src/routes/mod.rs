pub mod health;
pub mod listings;
pub mod upload;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /apartments                       list (GET), create (POST)
/// /apartments/{id}                  get, update (PATCH), delete
///
/// /upload/apartment-image           single image upload (POST)
/// /upload/apartment-images          batch image upload (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(listings::router())
        .merge(upload::router())
}
