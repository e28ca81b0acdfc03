use std::sync::Arc;

use crate::config::ServerConfig;
use crate::storage::UploadStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: rentora_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Storage backend for uploaded listing images.
    pub upload_store: Arc<dyn UploadStore>,
}
