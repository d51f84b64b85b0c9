//! Category model, normalization and derivation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use stone_store::Document;

use crate::ids::CategoryId;
use crate::product::Product;
use crate::tables::{category_image, display_name, UNCATEGORIZED};

/// A storefront category.
///
/// `product_count` is always derived locally from the loaded products and
/// never written back to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Document id, or `cat_N` when derived.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Lowercase category tag products point at.
    #[serde(rename = "type")]
    pub kind: String,
    /// Tile image URL.
    pub image: String,
    /// Display description.
    pub description: String,
    /// Number of loaded products in this category.
    #[serde(default, rename = "productCount")]
    pub product_count: usize,
}

impl Category {
    /// Normalize a raw category document.
    ///
    /// Stored category documents are trusted more than product documents,
    /// but missing fields still fall back to the configuration tables so a
    /// half-written document renders.
    pub fn from_document(doc: &Document) -> Self {
        let kind = doc.text_field("type").unwrap_or(UNCATEGORIZED).to_string();
        let name = doc
            .text_field("name")
            .map(str::to_string)
            .unwrap_or_else(|| display_name(&kind));
        let image = doc
            .text_field("image")
            .map(str::to_string)
            .unwrap_or_else(|| category_image(&kind).to_string());
        let description = doc
            .text_field("description")
            .map(str::to_string)
            .unwrap_or_else(|| stone_solutions(&name));

        Self {
            id: CategoryId::new(doc.id.clone()),
            name,
            kind,
            image,
            description,
            product_count: 0,
        }
    }
}

/// Derive categories from loaded products when the store has none.
///
/// Products group by category tag in first-seen order; names and images
/// come from the configuration tables, ids run `cat_0`, `cat_1`, ...
pub fn derive_categories(products: &[Product]) -> Vec<Category> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for product in products {
        let tag = product.category.as_str();
        if !counts.contains_key(tag) {
            order.push(tag);
        }
        *counts.entry(tag).or_insert(0) += 1;
    }

    order
        .iter()
        .enumerate()
        .map(|(index, tag)| {
            let name = display_name(tag);
            Category {
                id: CategoryId::new(format!("cat_{}", index)),
                description: stone_solutions(&name),
                name,
                kind: (*tag).to_string(),
                image: category_image(tag).to_string(),
                product_count: counts[tag],
            }
        })
        .collect()
}

/// Recompute every category's product count against the loaded products.
pub fn apply_product_counts(categories: &mut [Category], products: &[Product]) {
    for category in categories.iter_mut() {
        category.product_count = products
            .iter()
            .filter(|p| p.category == category.kind)
            .count();
    }
}

fn stone_solutions(name: &str) -> String {
    format!("{} stone solutions", name)
}
