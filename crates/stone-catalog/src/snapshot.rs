//! Owned catalog snapshots.
//!
//! A [`CatalogSnapshot`] is the unit the storefront renders from: one owned
//! value holding products, categories and the tier they came from. Reloads
//! and real-time pushes build a fresh snapshot and swap it into the
//! [`SnapshotCell`] wholesale; nothing mutates a snapshot in place, so a
//! reader can never observe a half-updated catalog.

use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::ids::ProductId;
use crate::loader::LoadTier;
use crate::product::Product;

/// A complete, render-ready view of the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    /// Products in display order.
    pub products: Vec<Product>,
    /// Categories in display order.
    pub categories: Vec<Category>,
    /// Which tier of the fallback cascade produced this snapshot.
    pub tier: LoadTier,
    /// When the snapshot was assembled, seconds since epoch.
    pub loaded_at: i64,
}

impl CatalogSnapshot {
    /// Assemble a snapshot, stamping the current time.
    pub fn new(products: Vec<Product>, categories: Vec<Category>, tier: LoadTier) -> Self {
        Self {
            products,
            categories,
            tier,
            loaded_at: current_timestamp(),
        }
    }

    /// Look up a product by id.
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Products carrying the given category tag.
    pub fn products_in_category(&self, tag: &str) -> Vec<&Product> {
        self.products.iter().filter(|p| p.category == tag).collect()
    }

    /// Look up a category by its tag.
    pub fn category_by_kind(&self, tag: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.kind == tag)
    }

    /// Number of products.
    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    /// Number of categories.
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// True when this snapshot is the static demo catalog.
    pub fn is_demo(&self) -> bool {
        self.tier == LoadTier::Fallback
    }
}

/// Shared holder for the current snapshot.
///
/// Readers take a cheap [`Arc`] clone of the current snapshot and keep
/// rendering from it even while a replacement lands. [`SnapshotCell::replace`]
/// swaps the whole snapshot in one step.
pub struct SnapshotCell {
    current: RwLock<Arc<CatalogSnapshot>>,
}

impl SnapshotCell {
    /// Create a cell holding an initial snapshot.
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// The current snapshot.
    pub fn current(&self) -> Arc<CatalogSnapshot> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the snapshot wholesale, returning the new handle.
    pub fn replace(&self, snapshot: CatalogSnapshot) -> Arc<CatalogSnapshot> {
        let next = Arc::new(snapshot);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = next.clone();
        next
    }
}

// Helper to get current timestamp (seconds since epoch)
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(names: &[&str]) -> CatalogSnapshot {
        let products: Vec<Product> = names
            .iter()
            .enumerate()
            .map(|(i, name)| Product::new(format!("{}", i + 1), *name, "flooring"))
            .collect();
        let categories = crate::category::derive_categories(&products);
        CatalogSnapshot::new(products, categories, LoadTier::Loaded)
    }

    #[test]
    fn test_lookups() {
        let snap = snapshot(&["Kota Blue", "Raj Green"]);

        assert_eq!(snap.product_count(), 2);
        assert_eq!(snap.category_count(), 1);
        assert!(snap.product(&ProductId::new("2")).is_some());
        assert!(snap.product(&ProductId::new("9")).is_none());
        assert_eq!(snap.products_in_category("flooring").len(), 2);
        assert!(snap.category_by_kind("flooring").is_some());
        assert!(!snap.is_demo());
    }

    #[test]
    fn test_replace_is_wholesale() {
        let cell = SnapshotCell::new(snapshot(&["Kota Blue"]));

        // A reader holding the old handle keeps a consistent view.
        let before = cell.current();
        assert_eq!(before.product_count(), 1);

        cell.replace(snapshot(&["Kota Blue", "Raj Green", "White Marble"]));

        assert_eq!(before.product_count(), 1);
        assert_eq!(cell.current().product_count(), 3);
    }

    #[test]
    fn test_concurrent_readers_see_old_or_new() {
        use std::thread;

        let cell = Arc::new(SnapshotCell::new(snapshot(&["a"])));
        let reader = {
            let cell = cell.clone();
            thread::spawn(move || {
                for _ in 0..100 {
                    let snap = cell.current();
                    // Counts always agree within one snapshot.
                    let total: usize =
                        snap.categories.iter().map(|c| c.product_count).sum();
                    assert_eq!(total, snap.product_count());
                }
            })
        };

        for i in 0..50 {
            let names: Vec<String> = (0..=i % 4).map(|n| format!("p{}", n)).collect();
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            cell.replace(snapshot(&refs));
        }
        reader.join().unwrap();
    }
}
