//! The catalog loading cascade.
//!
//! [`CatalogLoader::load`] never fails: it works down a three-tier cascade
//! until it has something to show. It fetches products from the backend,
//! pairs them with stored categories when those exist, derives categories
//! from the products themselves when they do not, and falls back to the
//! built-in demo catalog when no products are available at all. The tier
//! that won is recorded on the snapshot as a [`LoadTier`].

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::StreamExt;
use serde::{Deserialize, Serialize};

use stone_observability::StructuredLogger;
use stone_store::{sort_documents, DocumentStore, OrderBy, StoreResult};

use crate::category::{apply_product_counts, derive_categories, Category};
use crate::demo::demo_catalog;
use crate::product::Product;
use crate::seed::ensure_seed_data;
use crate::snapshot::{CatalogSnapshot, SnapshotCell};
use crate::{CATEGORIES_COLLECTION, PRODUCTS_COLLECTION};

/// How long the demo-mode notice stays on screen.
pub const DEMO_NOTICE_DURATION: Duration = Duration::from_secs(5);

/// Which tier of the cascade produced a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadTier {
    /// Products and categories both came from the backend.
    Loaded,
    /// Products came from the backend; categories were derived from them.
    Derived,
    /// Nothing usable came back; the snapshot is the static demo catalog.
    Fallback,
}

impl LoadTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadTier::Loaded => "loaded",
            LoadTier::Derived => "derived",
            LoadTier::Fallback => "fallback",
        }
    }

    /// True for any tier below a full backend load.
    pub fn is_degraded(&self) -> bool {
        !matches!(self, LoadTier::Loaded)
    }
}

impl fmt::Display for LoadTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transient message for the person looking at the storefront.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
    /// How long the notice should stay visible.
    pub duration: Duration,
}

impl Notice {
    /// The notice shown when the demo catalog is being served.
    pub fn demo_mode() -> Self {
        Self {
            title: "Demo Mode".to_string(),
            message: "Using demo data. Real data will load when the catalog backend is configured."
                .to_string(),
            duration: DEMO_NOTICE_DURATION,
        }
    }
}

/// Where loader notices go.
///
/// A storefront wires this to its toast or banner layer. The loader emits at
/// most one demo-mode notice per fall into the fallback tier.
pub trait NoticeSink: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Sink that drops every notice. The default when no surface is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNoticeSink;

impl NoticeSink for NullNoticeSink {
    fn notify(&self, _notice: Notice) {}
}

/// Loader tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Product ordering for backend reads.
    pub order: OrderBy,
    /// Seed sample data into empty collections before the first fetch.
    pub seed_if_empty: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            order: OrderBy::default(),
            seed_if_empty: true,
        }
    }
}

/// Assembles catalog snapshots from a document store.
pub struct CatalogLoader<S: DocumentStore + ?Sized> {
    store: Arc<S>,
    config: LoaderConfig,
    notices: Arc<dyn NoticeSink>,
    logger: StructuredLogger,
}

impl<S: DocumentStore + ?Sized> CatalogLoader<S> {
    /// Create a loader over a shared store handle.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            config: LoaderConfig::default(),
            notices: Arc::new(NullNoticeSink),
            logger: StructuredLogger::new("catalog-loader"),
        }
    }

    pub fn with_config(mut self, config: LoaderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_notice_sink(mut self, sink: Arc<dyn NoticeSink>) -> Self {
        self.notices = sink;
        self
    }

    pub fn with_logger(mut self, logger: StructuredLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load the catalog.
    ///
    /// Never returns an error: any backend trouble drops the load one tier
    /// down the cascade and the snapshot records where it landed.
    pub async fn load(&self) -> CatalogSnapshot {
        let started = Instant::now();

        if self.config.seed_if_empty {
            match ensure_seed_data(self.store.as_ref()).await {
                Ok(report) if !report.is_noop() => {
                    self.logger
                        .info_builder("seeded sample data")
                        .count("categories_created", report.categories_created)
                        .count("products_created", report.products_created)
                        .emit();
                }
                Ok(_) => {}
                Err(err) => {
                    // Not fatal; the fetch below decides which tier we land on.
                    self.logger
                        .warn_builder("seeding failed, continuing with fetch")
                        .field("error", err.to_string())
                        .emit();
                }
            }
        }

        let products = match self.fetch_products().await {
            Ok(products) => products,
            Err(err) => {
                self.logger
                    .with_collection(PRODUCTS_COLLECTION)
                    .warn_builder("product fetch failed")
                    .field("error", err.to_string())
                    .emit();
                Vec::new()
            }
        };

        let snapshot = self.assemble(products, true).await;

        self.logger
            .info_builder("catalog load complete")
            .field("tier", snapshot.tier.as_str())
            .count("products", snapshot.products.len())
            .count("categories", snapshot.categories.len())
            .duration_ms("elapsed_ms", started.elapsed())
            .emit();

        snapshot
    }

    /// Follow real-time pushes, replacing the cell's snapshot wholesale on
    /// each one.
    ///
    /// Every push carries the entire product set, so each iteration rebuilds
    /// the full snapshot from scratch. Runs until the watch stream ends. The
    /// demo notice fires only when a push drops the catalog into the
    /// fallback tier from somewhere else; staying in fallback stays quiet.
    pub async fn follow(&self, cell: &SnapshotCell) {
        let mut watch = self.store.watch(PRODUCTS_COLLECTION);
        while let Some(mut docs) = watch.next().await {
            // Pushes arrive in backend order; apply the configured ordering
            // so subscribed reloads match explicit ones.
            sort_documents(&mut docs, &self.config.order);
            let products: Vec<Product> = docs.iter().map(Product::from_document).collect();
            let was_fallback = cell.current().tier == LoadTier::Fallback;
            let snapshot = self.assemble(products, !was_fallback).await;
            cell.replace(snapshot);
        }
        self.logger.info("product watch ended");
    }

    async fn fetch_products(&self) -> StoreResult<Vec<Product>> {
        let docs = self
            .store
            .list_ordered(PRODUCTS_COLLECTION, &self.config.order)
            .await?;
        Ok(docs.iter().map(Product::from_document).collect())
    }

    async fn fetch_categories(&self) -> StoreResult<Vec<Category>> {
        let docs = self.store.list(CATEGORIES_COLLECTION).await?;
        Ok(docs.iter().map(Category::from_document).collect())
    }

    /// Build a snapshot from an already-fetched product set.
    async fn assemble(&self, products: Vec<Product>, notify_fallback: bool) -> CatalogSnapshot {
        if products.is_empty() {
            return self.demo_snapshot(notify_fallback);
        }

        let (mut categories, tier) = match self.fetch_categories().await {
            Ok(categories) if !categories.is_empty() => (categories, LoadTier::Loaded),
            Ok(_) => {
                self.logger
                    .with_collection(CATEGORIES_COLLECTION)
                    .warn("no stored categories, deriving from products");
                (derive_categories(&products), LoadTier::Derived)
            }
            Err(err) => {
                self.logger
                    .with_collection(CATEGORIES_COLLECTION)
                    .warn_builder("category fetch failed, deriving from products")
                    .field("error", err.to_string())
                    .emit();
                (derive_categories(&products), LoadTier::Derived)
            }
        };

        // Counts are always recomputed from the products actually shown.
        apply_product_counts(&mut categories, &products);

        CatalogSnapshot::new(products, categories, tier)
    }

    fn demo_snapshot(&self, notify: bool) -> CatalogSnapshot {
        let (products, categories) = demo_catalog();
        self.logger
            .warn_builder("no products available, serving demo catalog")
            .count("products", products.len())
            .emit();
        if notify {
            self.notices.notify(Notice::demo_mode());
        }
        CatalogSnapshot::new(products, categories, LoadTier::Fallback)
    }
}
