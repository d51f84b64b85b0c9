//! Store operation errors.

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Document store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend could not be reached at all.
    #[error("backend unreachable: {0}")]
    Unreachable(String),

    /// A document addressed by id does not exist.
    #[error("document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    /// A document could not be decoded into the expected shape.
    #[error("malformed document in {collection}: {reason}")]
    Malformed { collection: String, reason: String },

    /// Any other backend-reported failure.
    #[error("backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Shorthand for a not-found error.
    pub fn not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// True when the failure means the backend itself is down, as opposed
    /// to a per-document problem.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable(_))
    }
}
