//! Catalog error types.
//!
//! Catalog reads never error (the loader absorbs failures into its fallback
//! cascade) and seeding reuses [`stone_store::StoreError`] directly, so the
//! only error surface this crate owns is the admin write path.

use thiserror::Error;

use stone_media::MediaError;
use stone_store::StoreError;

/// Errors from the product administration flow.
///
/// Write failures are surfaced to the person editing the catalog, so every
/// variant maps to a friendly message via [`AdminError::user_message`].
#[derive(Error, Debug)]
pub enum AdminError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// The image upload failed before any document was written.
    #[error("Image upload failed: {0}")]
    ImageUpload(String),

    /// The backend rejected or lost the write.
    #[error("Write failed: {0}")]
    WriteFailed(String),

    /// The backend could not be reached.
    #[error("Backend unreachable: {0}")]
    Unreachable(String),

    /// The draft was rejected before any write was attempted.
    #[error("Invalid draft: {0}")]
    InvalidDraft(String),
}

impl AdminError {
    /// A message suitable for showing directly to the catalog editor.
    pub fn user_message(&self) -> String {
        match self {
            Self::ProductNotFound(_) => "That product no longer exists.".to_string(),
            Self::ImageUpload(_) => {
                "Image upload failed. The product was not saved.".to_string()
            }
            Self::WriteFailed(_) => "Saving failed. Your changes were not stored.".to_string(),
            Self::Unreachable(_) => "Network error. Please check your connection.".to_string(),
            Self::InvalidDraft(reason) => reason.clone(),
        }
    }
}

impl From<StoreError> for AdminError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unreachable(msg) => AdminError::Unreachable(msg),
            StoreError::NotFound { id, .. } => AdminError::ProductNotFound(id),
            other => AdminError::WriteFailed(other.to_string()),
        }
    }
}

impl From<MediaError> for AdminError {
    fn from(e: MediaError) -> Self {
        AdminError::ImageUpload(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_conversion() {
        let err: AdminError = StoreError::not_found("products", "p9").into();
        assert!(matches!(err, AdminError::ProductNotFound(ref id) if id == "p9"));

        let err: AdminError = StoreError::Unreachable("timeout".to_string()).into();
        assert!(matches!(err, AdminError::Unreachable(_)));
        assert_eq!(
            err.user_message(),
            "Network error. Please check your connection."
        );
    }

    #[test]
    fn test_media_error_conversion() {
        let err: AdminError = MediaError::UploadFailed("quota".to_string()).into();
        assert!(matches!(err, AdminError::ImageUpload(_)));
        assert_eq!(
            err.user_message(),
            "Image upload failed. The product was not saved."
        );
    }

    #[test]
    fn test_invalid_draft_message_passes_through() {
        let err = AdminError::InvalidDraft("Product name is required.".to_string());
        assert_eq!(err.user_message(), "Product name is required.");
    }
}
