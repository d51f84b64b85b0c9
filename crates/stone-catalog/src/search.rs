//! Client-side catalog search.
//!
//! Search never touches the backend: it scans the in-memory snapshot with
//! case-insensitive substring matching, so it works identically on loaded,
//! derived and demo catalogs.

use serde::Serialize;

use crate::category::Category;
use crate::product::Product;
use crate::snapshot::CatalogSnapshot;

/// One search match, in display rank order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchHit<'a> {
    Category(&'a Category),
    Product(&'a Product),
}

impl<'a> SearchHit<'a> {
    /// The name shown for this hit.
    pub fn name(&self) -> &'a str {
        match self {
            SearchHit::Category(category) => &category.name,
            SearchHit::Product(product) => &product.name,
        }
    }
}

/// Matches for one query, grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchResults<'a> {
    pub categories: Vec<&'a Category>,
    pub products: Vec<&'a Product>,
}

impl<'a> SearchResults<'a> {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.products.is_empty()
    }

    pub fn len(&self) -> usize {
        self.categories.len() + self.products.len()
    }

    /// All hits in rank order: categories first, then products, each group
    /// keeping its snapshot order.
    pub fn hits(&self) -> Vec<SearchHit<'a>> {
        self.categories
            .iter()
            .map(|c| SearchHit::Category(c))
            .chain(self.products.iter().map(|p| SearchHit::Product(p)))
            .collect()
    }
}

/// Search a snapshot.
///
/// A blank query matches nothing rather than everything; browsing the full
/// catalog is the storefront's job, not search's.
pub fn search<'a>(snapshot: &'a CatalogSnapshot, query: &str) -> SearchResults<'a> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return SearchResults::default();
    }

    let categories = snapshot
        .categories
        .iter()
        .filter(|c| category_matches(c, &needle))
        .collect();
    let products = snapshot
        .products
        .iter()
        .filter(|p| product_matches(p, &needle))
        .collect();

    SearchResults {
        categories,
        products,
    }
}

fn category_matches(category: &Category, needle: &str) -> bool {
    contains(&category.name, needle) || contains(&category.kind, needle)
}

fn product_matches(product: &Product, needle: &str) -> bool {
    contains(&product.name, needle)
        || contains(&product.description, needle)
        || contains(&product.category, needle)
        || product.stone_name.as_deref().is_some_and(|s| contains(s, needle))
        || product.kind.as_deref().is_some_and(|s| contains(s, needle))
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::loader::LoadTier;

    fn snapshot() -> CatalogSnapshot {
        let products = vec![
            Product::new("1", "Kota Blue Stone", "flooring")
                .with_description("Premium quality natural stone")
                .with_stone_name("Kota Blue")
                .with_kind("Natural Stone"),
            Product::new("2", "White Marble Tiles", "bathroom")
                .with_description("Elegant white marble"),
            Product::new("3", "Black Galaxy Granite", "kitchen")
                .with_description("Stunning black granite with golden speckles"),
        ];
        let categories = crate::category::derive_categories(&products);
        CatalogSnapshot::new(products, categories, LoadTier::Loaded)
    }

    #[test]
    fn test_blank_query_matches_nothing() {
        let snap = snapshot();
        assert!(search(&snap, "").is_empty());
        assert!(search(&snap, "   ").is_empty());
    }

    #[test]
    fn test_match_is_case_insensitive_substring() {
        let snap = snapshot();

        let results = search(&snap, "KOTA");
        assert_eq!(results.products.len(), 1);
        assert_eq!(results.products[0].name, "Kota Blue Stone");

        let results = search(&snap, "arble");
        assert_eq!(results.products.len(), 1);
        assert_eq!(results.products[0].id.as_str(), "2");
    }

    #[test]
    fn test_products_match_on_every_searched_field() {
        let snap = snapshot();

        // description
        assert_eq!(search(&snap, "speckles").products.len(), 1);
        // category tag
        assert_eq!(search(&snap, "kitchen").products.len(), 1);
        // stone name
        assert_eq!(search(&snap, "kota blue").products.len(), 1);
        // type
        let results = search(&snap, "natural stone");
        assert_eq!(results.products.len(), 1);
        assert_eq!(results.products[0].kind.as_deref(), Some("Natural Stone"));
    }

    #[test]
    fn test_categories_rank_before_products() {
        let snap = snapshot();

        // "flooring" hits the Flooring category and the product tagged with it.
        let results = search(&snap, "flooring");
        assert_eq!(results.categories.len(), 1);
        assert_eq!(results.products.len(), 1);

        let hits = results.hits();
        assert_eq!(hits.len(), 2);
        assert!(matches!(hits[0], SearchHit::Category(_)));
        assert!(matches!(hits[1], SearchHit::Product(_)));
        assert_eq!(hits[0].name(), "Flooring");
    }

    #[test]
    fn test_no_match_is_empty() {
        let snap = snapshot();
        let results = search(&snap, "quartzite");
        assert!(results.is_empty());
        assert_eq!(results.len(), 0);
    }
}
