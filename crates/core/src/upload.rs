//! Upload validation and storage-name generation for listing images.
//!
//! Validation and naming are independent of where the bytes land; the api
//! crate plugs these into its storage backend.

use rand::Rng;

use crate::error::CoreError;

/// Allowed image file extensions (compared case-insensitively).
pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 4] = [".jpg", ".jpeg", ".png", ".webp"];

/// Maximum upload size per file: 5 MiB.
pub const MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// Maximum number of files in a batch upload.
pub const MAX_FILES_PER_BATCH: usize = 10;

/// Public path prefix under which stored images are served.
pub const PUBLIC_UPLOAD_PREFIX: &str = "/uploads/listings";

/// Extract the lowercased extension (including the dot) from a filename.
pub fn extension(filename: &str) -> Option<String> {
    let basename = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    basename
        .rfind('.')
        .filter(|&idx| idx > 0)
        .map(|idx| basename[idx..].to_ascii_lowercase())
}

/// Validate a single file: extension allow-list first, then size cap.
pub fn validate_upload(filename: &str, size: u64) -> Result<(), CoreError> {
    let ext = extension(filename).ok_or_else(|| {
        CoreError::Validation(format!(
            "Invalid file type. Allowed types: {}",
            ALLOWED_IMAGE_EXTENSIONS.join(", ")
        ))
    })?;
    if !ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return Err(CoreError::Validation(format!(
            "Invalid file type. Allowed types: {}",
            ALLOWED_IMAGE_EXTENSIONS.join(", ")
        )));
    }
    if size > MAX_FILE_SIZE_BYTES {
        return Err(CoreError::Validation(format!(
            "File too large. Maximum size is {MAX_FILE_SIZE_BYTES} bytes"
        )));
    }
    Ok(())
}

/// Validate a batch of `(filename, size)` pairs atomically: any invalid
/// file (or an empty/oversized batch) rejects the whole request before a
/// single byte is stored.
pub fn validate_batch(files: &[(String, u64)]) -> Result<(), CoreError> {
    if files.is_empty() {
        return Err(CoreError::Validation("No files uploaded".to_string()));
    }
    if files.len() > MAX_FILES_PER_BATCH {
        return Err(CoreError::Validation(format!(
            "Too many files. Maximum is {MAX_FILES_PER_BATCH} per upload"
        )));
    }
    for (filename, size) in files {
        validate_upload(filename, *size)?;
    }
    Ok(())
}

/// Generate a collision-resistant storage name, preserving the original
/// extension: `listing-{unix_millis}-{9-digit random}{ext}`.
pub fn stored_name(original: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let random: u32 = rand::rng().random_range(0..1_000_000_000);
    stored_name_at(original, millis, random)
}

fn stored_name_at(original: &str, millis: i64, random: u32) -> String {
    let ext = extension(original).unwrap_or_default();
    format!("listing-{millis}-{random:09}{ext}")
}

/// Public URL for a stored file.
pub fn public_url(stored: &str) -> String {
    format!("{PUBLIC_UPLOAD_PREFIX}/{stored}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased_and_dot_prefixed() {
        assert_eq!(extension("photo.JPG"), Some(".jpg".to_string()));
        assert_eq!(extension("a/b/photo.webp"), Some(".webp".to_string()));
        assert_eq!(extension("archive.tar.gz"), Some(".gz".to_string()));
        assert_eq!(extension("noext"), None);
        assert_eq!(extension(".hidden"), None);
    }

    #[test]
    fn allowed_extensions_accepted_case_insensitively() {
        for name in ["a.jpg", "b.JPEG", "c.Png", "d.WEBP"] {
            assert!(validate_upload(name, 100).is_ok(), "{name}");
        }
    }

    #[test]
    fn disallowed_extension_rejected_before_size() {
        // Oversized AND wrong type: the extension error wins.
        let err = validate_upload("script.exe", MAX_FILE_SIZE_BYTES + 1).unwrap_err();
        assert!(err.to_string().contains("Invalid file type"));
    }

    #[test]
    fn oversized_file_rejected() {
        assert!(validate_upload("big.png", MAX_FILE_SIZE_BYTES).is_ok());
        let err = validate_upload("big.png", MAX_FILE_SIZE_BYTES + 1).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn batch_is_atomic() {
        let files = vec![
            ("a.jpg".to_string(), 10),
            ("b.gif".to_string(), 10),
            ("c.png".to_string(), 10),
        ];
        assert!(validate_batch(&files).is_err());

        let files = vec![("a.jpg".to_string(), 10), ("c.png".to_string(), 10)];
        assert!(validate_batch(&files).is_ok());
    }

    #[test]
    fn empty_and_oversized_batches_rejected() {
        assert!(validate_batch(&[]).is_err());
        let too_many: Vec<_> = (0..=MAX_FILES_PER_BATCH)
            .map(|i| (format!("f{i}.jpg"), 10))
            .collect();
        assert!(validate_batch(&too_many).is_err());
    }

    #[test]
    fn stored_name_preserves_extension_and_pads_random() {
        let name = stored_name_at("My Photo.JPG", 1700000000123, 42);
        assert_eq!(name, "listing-1700000000123-000000042.jpg");
    }

    #[test]
    fn stored_names_differ_for_identical_inputs() {
        // Random component makes concurrent uploads of the same filename
        // collision-resistant even within one millisecond.
        let a = stored_name("same.png");
        let b = stored_name("same.png");
        assert_ne!(a, b);
    }

    #[test]
    fn public_url_prefixes_storage_area() {
        assert_eq!(
            public_url("listing-1-000000001.jpg"),
            "/uploads/listings/listing-1-000000001.jpg"
        );
    }
}
