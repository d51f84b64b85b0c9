//! Blob storage seam for product imagery.
//!
//! Product photos live in an external object store; the admin flow uploads
//! them under timestamped keys and stores only the resulting public URL on
//! the product document. This crate defines the [`BlobStore`] trait, the
//! key scheme, and an in-memory backend for development and tests.

pub mod blob;
pub mod error;
pub mod memory;

pub use blob::{object_key, sanitize_file_name, BlobStore, ImageUpload, OBJECT_PREFIX};
pub use error::{MediaError, MediaResult};
pub use memory::MemoryBlobStore;
