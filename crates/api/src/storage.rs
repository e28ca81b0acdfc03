//! Pluggable storage backend for uploaded listing images.
//!
//! Name generation and validation live in `rentora_core::upload`; this
//! trait only decides where the bytes land, so a future object-store
//! backend slots in without touching the handlers.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use rentora_core::upload::{public_url, PUBLIC_UPLOAD_PREFIX};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid stored file name: {0}")]
    InvalidName(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where uploaded bytes are persisted.
#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Persist `bytes` under the generated `name`, returning the public URL.
    async fn store(&self, name: &str, bytes: &[u8]) -> Result<String, StorageError>;

    /// Remove a previously stored file by its public URL. Unknown URLs are
    /// not an error.
    async fn delete(&self, url: &str) -> Result<(), StorageError>;
}

/// Local-filesystem storage serving files from the configured upload dir.
pub struct LocalDiskStore {
    dir: PathBuf,
}

impl LocalDiskStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory files are served from (used to mount static serving).
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Generated names never contain separators; reject anything else so a
    /// crafted name cannot escape the upload dir.
    fn resolve(&self, name: &str) -> Result<PathBuf, StorageError> {
        if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
            return Err(StorageError::InvalidName(name.to_string()));
        }
        Ok(self.dir.join(name))
    }
}

#[async_trait]
impl UploadStore for LocalDiskStore {
    async fn store(&self, name: &str, bytes: &[u8]) -> Result<String, StorageError> {
        let path = self.resolve(name)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(&path, bytes).await?;
        tracing::debug!(name, size = bytes.len(), "Stored uploaded file");
        Ok(public_url(name))
    }

    async fn delete(&self, url: &str) -> Result<(), StorageError> {
        let name = url
            .strip_prefix(PUBLIC_UPLOAD_PREFIX)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| StorageError::InvalidName(url.to_string()))?;
        let path = self.resolve(name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(name, "Deleted uploaded file");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn store_writes_and_returns_public_url() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalDiskStore::new(tmp.path());

        let url = store
            .store("listing-1-000000001.jpg", b"bytes")
            .await
            .unwrap();
        assert_eq!(url, "/uploads/listings/listing-1-000000001.jpg");
        let on_disk = tokio::fs::read(tmp.path().join("listing-1-000000001.jpg"))
            .await
            .unwrap();
        assert_eq!(on_disk, b"bytes");
    }

    #[tokio::test]
    async fn delete_removes_file_and_tolerates_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalDiskStore::new(tmp.path());

        let url = store.store("listing-1-000000002.png", b"x").await.unwrap();
        store.delete(&url).await.unwrap();
        assert!(!tmp.path().join("listing-1-000000002.png").exists());

        // Deleting again is not an error.
        store.delete(&url).await.unwrap();
    }

    #[tokio::test]
    async fn traversal_names_are_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalDiskStore::new(tmp.path());

        assert!(store.store("../evil.jpg", b"x").await.is_err());
        assert!(store.store("a/b.jpg", b"x").await.is_err());
        assert!(store.delete("/etc/passwd").await.is_err());
    }
}
