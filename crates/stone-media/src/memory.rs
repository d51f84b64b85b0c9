//! In-memory blob store for development and tests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::blob::BlobStore;
use crate::error::{MediaError, MediaResult};

/// In-memory [`BlobStore`] backend. Public URLs use a `memory://` scheme.
#[derive(Default)]
pub struct MemoryBlobStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    blobs: HashMap<String, StoredBlob>,
    failing: bool,
}

struct StoredBlob {
    bytes: Vec<u8>,
    content_type: String,
}

impl MemoryBlobStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every upload fail, for exercising surfaced write errors.
    pub fn fail_uploads(&self) {
        self.lock().failing = true;
    }

    /// Undo [`MemoryBlobStore::fail_uploads`].
    pub fn restore_uploads(&self) {
        self.lock().failing = false;
    }

    /// Number of stored blobs.
    pub fn len(&self) -> usize {
        self.lock().blobs.len()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The stored content type for a key, if present.
    pub fn content_type(&self, key: &str) -> Option<String> {
        self.lock().blobs.get(key).map(|b| b.content_type.clone())
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> MediaResult<String> {
        let mut inner = self.lock();
        if inner.failing {
            return Err(MediaError::UploadFailed("storage offline".to_string()));
        }
        inner.blobs.insert(
            key.to_string(),
            StoredBlob {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(format!("memory://{}", key))
    }

    async fn delete(&self, key: &str) -> MediaResult<()> {
        let mut inner = self.lock();
        inner
            .blobs
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| MediaError::NotFound(key.to_string()))
    }

    async fn exists(&self, key: &str) -> MediaResult<bool> {
        Ok(self.lock().blobs.contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_and_lookup() {
        let store = MemoryBlobStore::new();
        let url = store
            .upload("products/1_tile.jpg", vec![0xFF, 0xD8], "image/jpeg")
            .await
            .unwrap();

        assert_eq!(url, "memory://products/1_tile.jpg");
        assert!(store.exists("products/1_tile.jpg").await.unwrap());
        assert_eq!(
            store.content_type("products/1_tile.jpg").as_deref(),
            Some("image/jpeg")
        );
        assert_eq!(store.lock().blobs["products/1_tile.jpg"].bytes, vec![0xFF, 0xD8]);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryBlobStore::new();
        store
            .upload("products/2_slab.png", vec![1], "image/png")
            .await
            .unwrap();

        store.delete("products/2_slab.png").await.unwrap();
        assert!(!store.exists("products/2_slab.png").await.unwrap());
        assert!(matches!(
            store.delete("products/2_slab.png").await,
            Err(MediaError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let store = MemoryBlobStore::new();
        store.fail_uploads();
        assert!(matches!(
            store.upload("k", vec![], "image/png").await,
            Err(MediaError::UploadFailed(_))
        ));

        store.restore_uploads();
        assert!(store.upload("k", vec![], "image/png").await.is_ok());
    }
}
