//! Static demo dataset.
//!
//! The last tier of the loader's fallback cascade. These products exist so
//! the storefront renders something meaningful even with no backend at all;
//! ids are fixed (`1`, `2`, `3`, ...) and categories are derived the same
//! way they are for live data.

use crate::category::{derive_categories, Category};
use crate::product::Product;

/// The fixed demo products.
pub fn demo_products() -> Vec<Product> {
    vec![
        Product::new("1", "Kota Blue Stone", "flooring")
            .with_price("\u{00a3}45.00")
            .with_image("https://images.unsplash.com/photo-1586023492125-27b2c045efd7?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=400&q=80")
            .with_description("Premium quality kota stone for flooring")
            .with_stone_name("Kota Blue")
            .with_kind("Natural Stone"),
        Product::new("2", "White Marble Tiles", "bathroom")
            .with_price("\u{00a3}75.00")
            .with_image("https://images.unsplash.com/photo-1600607687939-ce8a6c25118c?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=400&q=80")
            .with_description("Luxury white marble tiles for bathroom walls and floors")
            .with_stone_name("White Marble")
            .with_kind("Polished"),
        Product::new("3", "Black Galaxy Granite", "kitchen")
            .with_price("\u{00a3}120.00")
            .with_image("https://images.unsplash.com/photo-1556909114-f6e7ad7d3136?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=400&q=80")
            .with_description("Premium black granite for kitchen countertops")
            .with_stone_name("Black Galaxy")
            .with_kind("Polished"),
    ]
}

/// The complete demo catalog: products plus derived categories.
pub fn demo_catalog() -> (Vec<Product>, Vec<Category>) {
    let products = demo_products();
    let categories = derive_categories(&products);
    (products, categories)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_ids_are_sequential() {
        let products = demo_products();
        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_demo_products_are_fully_displayable() {
        for product in demo_products() {
            assert!(!product.name.is_empty());
            assert!(!product.category.is_empty());
            assert!(product.price.starts_with('\u{00a3}'));
            assert!(product.image.starts_with("https://"));
            assert!(!product.description.is_empty());
        }
    }

    #[test]
    fn test_demo_catalog_derives_one_category_per_tag() {
        let (products, categories) = demo_catalog();
        assert_eq!(categories.len(), 3);
        let total: usize = categories.iter().map(|c| c.product_count).sum();
        assert_eq!(total, products.len());
    }
}
