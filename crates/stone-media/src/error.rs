//! Media storage errors.

/// Result type for blob operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Blob store errors.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    /// The upload itself failed.
    #[error("upload failed: {0}")]
    UploadFailed(String),

    /// No blob stored under the given key.
    #[error("blob not found: {0}")]
    NotFound(String),

    /// Any other backend-reported failure.
    #[error("storage error: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MediaError::UploadFailed("quota exceeded".to_string());
        assert_eq!(err.to_string(), "upload failed: quota exceeded");
    }
}
