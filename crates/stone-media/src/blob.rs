//! Blob store trait and object keys.

use async_trait::async_trait;

use crate::error::MediaResult;

/// Key prefix for product imagery.
pub const OBJECT_PREFIX: &str = "products";

/// Build the object key for an uploaded product image.
///
/// Keys are `products/{upload_ms}_{file_name}`; the millisecond timestamp
/// keeps repeated uploads of the same file name from clobbering each other.
pub fn object_key(file_name: &str, uploaded_at_ms: u64) -> String {
    format!(
        "{}/{}_{}",
        OBJECT_PREFIX,
        uploaded_at_ms,
        sanitize_file_name(file_name)
    )
}

/// Reduce a file name to key-safe characters.
///
/// Anything outside `[A-Za-z0-9._-]` becomes an underscore; an empty result
/// falls back to `upload`.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

/// An image waiting to be uploaded.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Original file name (sanitized into the key).
    pub file_name: String,
    /// MIME type, e.g. `image/jpeg`.
    pub content_type: String,
    /// Raw image bytes.
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Create an upload.
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// The object key this upload lands under at the given moment.
    pub fn key_at(&self, uploaded_at_ms: u64) -> String {
        object_key(&self.file_name, uploaded_at_ms)
    }
}

/// External object store seam.
///
/// Implementations return a public URL for every stored blob; only that URL
/// is persisted on catalog documents.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store bytes under a key, returning the public URL.
    async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> MediaResult<String>;

    /// Delete a stored blob.
    async fn delete(&self, key: &str) -> MediaResult<()>;

    /// Check whether a key holds a blob.
    async fn exists(&self, key: &str) -> MediaResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_format() {
        let key = object_key("kota-blue.jpg", 1700000000000);
        assert_eq!(key, "products/1700000000000_kota-blue.jpg");
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("kota blue (1).jpg"), "kota_blue__1_.jpg");
        assert_eq!(sanitize_file_name("tile.png"), "tile.png");
        assert_eq!(sanitize_file_name(""), "upload");
    }

    #[test]
    fn test_upload_key_at() {
        let upload = ImageUpload::new("wall décor.png", "image/png", vec![1, 2, 3]);
        assert_eq!(upload.key_at(42), "products/42_wall_d_cor.png");
    }
}
