//! Document store seam for the StoneCraft catalog platform.
//!
//! The remote catalog database is a collection-of-documents store addressed
//! by string collection names (`products`, `categories`, `users`). Documents
//! are loosely-typed field bags; this crate defines the [`Document`] shape,
//! the [`DocumentStore`] trait the rest of the platform programs against,
//! and an in-memory backend for development and tests.
//!
//! Ordering by recency is a configuration choice, not a constant: some
//! deployments stamp `created_at`, others `timestamp`. See [`OrderField`].

pub mod document;
pub mod error;
pub mod memory;
pub mod order;
pub mod store;

pub use document::Document;
pub use error::{StoreError, StoreResult};
pub use memory::{Dataset, MemoryStore};
pub use order::{sort_documents, Direction, OrderBy, OrderField};
pub use store::{CollectionWatch, DocumentStore};
