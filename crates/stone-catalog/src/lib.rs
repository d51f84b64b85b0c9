//! Catalog domain for the StoneCraft storefront.
//!
//! The storefront renders whatever this crate hands it, so the central
//! promise here is that loading never fails: [`loader::CatalogLoader`]
//! degrades through remote data, locally derived categories, and finally a
//! static demo dataset, and always returns a render-ready
//! [`snapshot::CatalogSnapshot`].
//!
//! The rest of the crate supports that loop:
//!
//! - [`product`] / [`category`]: typed models plus normalization of the
//!   loosely-typed documents the remote store actually holds
//! - [`tables`]: the immutable category name and image tables
//! - [`seed`]: idempotent sample-data seeding for empty backends
//! - [`demo`]: the static fallback dataset
//! - [`search`]: case-insensitive client-side search over a snapshot
//! - [`admin`]: the write path (add, update, delete, mark posted)

pub mod admin;
pub mod category;
pub mod demo;
pub mod error;
pub mod ids;
pub mod loader;
pub mod product;
pub mod search;
pub mod seed;
pub mod snapshot;
pub mod tables;

pub use admin::{ProductAdmin, ProductDraft, ProductStatus};
pub use error::AdminError;
pub use ids::{CategoryId, ProductId, UserId};
pub use loader::{CatalogLoader, LoadTier, LoaderConfig, Notice, NoticeSink};
pub use product::Product;
pub use category::Category;
pub use snapshot::{CatalogSnapshot, SnapshotCell};

/// Collection holding product documents.
pub const PRODUCTS_COLLECTION: &str = "products";

/// Collection holding category documents.
pub const CATEGORIES_COLLECTION: &str = "categories";

/// Commonly used types.
pub mod prelude {
    pub use crate::admin::{ProductAdmin, ProductDraft, ProductStatus};
    pub use crate::category::Category;
    pub use crate::error::AdminError;
    pub use crate::ids::{CategoryId, ProductId, UserId};
    pub use crate::loader::{CatalogLoader, LoadTier, LoaderConfig, Notice, NoticeSink};
    pub use crate::product::Product;
    pub use crate::search::{search, SearchHit, SearchResults};
    pub use crate::seed::{ensure_seed_data, SeedReport};
    pub use crate::snapshot::{CatalogSnapshot, SnapshotCell};
}
