//! Immutable category configuration tables.
//!
//! Display names and imagery for category tags live here as const tables so
//! unknown-tag handling is a single code path instead of literals scattered
//! through the render flow.

/// Image used when a product document carries no usable image field.
pub const PLACEHOLDER_PRODUCT_IMAGE: &str = "https://images.unsplash.com/photo-1586023492125-27b2c045efd7?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=400&q=80";

/// Image used for category tags with no table entry.
pub const GENERIC_CATEGORY_IMAGE: &str = "https://images.unsplash.com/photo-1586023492125-27b2c045efd7?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=600&q=80";

/// Sentinel price for products without one.
pub const PRICE_NOT_SET: &str = "Price not set";

/// Name for products missing both `name` and `stone_name`.
pub const UNNAMED_PRODUCT: &str = "Unnamed Product";

/// Description for products without one.
pub const NO_DESCRIPTION: &str = "No description available";

/// Tag applied to products without a category.
pub const UNCATEGORIZED: &str = "uncategorized";

const CATEGORY_NAMES: &[(&str, &str)] = &[
    ("sandstone", "Sandstone"),
    ("flooring", "Flooring"),
    ("wall", "Wall Decoration"),
    ("bathroom", "Bathroom"),
    ("outdoor", "Outdoor"),
    ("kitchen", "Kitchen"),
    ("commercial", "Commercial"),
    ("uncategorized", "Other Stones"),
];

const CATEGORY_IMAGES: &[(&str, &str)] = &[
    ("sandstone", "https://images.unsplash.com/photo-1586023492125-27b2c045efd7?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=600&q=80"),
    ("flooring", "https://images.unsplash.com/photo-1586023492125-27b2c045efd7?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=600&q=80"),
    ("wall", "https://images.unsplash.com/photo-1600607687939-ce8a6c25118c?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=600&q=80"),
    ("bathroom", "https://images.unsplash.com/photo-1600607687920-26eb2c5fab6a?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=600&q=80"),
    ("outdoor", "https://images.unsplash.com/photo-1600585154340-2e5db6e509e9?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=600&q=80"),
    ("kitchen", "https://images.unsplash.com/photo-1556909114-f6e7ad7d3136?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=600&q=80"),
    ("commercial", "https://images.unsplash.com/photo-1497366754035-f200968a6e72?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=600&q=80"),
];

/// Display name for a category tag.
///
/// Unknown tags fall back to the raw tag with only its first character
/// uppercased, so `granite` renders as `Granite` and `kota blue` as
/// `Kota blue`.
pub fn display_name(tag: &str) -> String {
    CATEGORY_NAMES
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| capitalize_first(tag))
}

/// Image URL for a category tag.
pub fn category_image(tag: &str) -> &'static str {
    CATEGORY_IMAGES
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, url)| *url)
        .unwrap_or(GENERIC_CATEGORY_IMAGE)
}

/// Uppercase only the first character, leaving the rest untouched.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Format a numeric price for display, GBP with two decimals.
pub fn format_price(amount: f64) -> String {
    format!("\u{00a3}{:.2}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_display_names() {
        assert_eq!(display_name("flooring"), "Flooring");
        assert_eq!(display_name("wall"), "Wall Decoration");
        assert_eq!(display_name("uncategorized"), "Other Stones");
    }

    #[test]
    fn test_unknown_tag_capitalizes_first_character_only() {
        assert_eq!(display_name("granite"), "Granite");
        assert_eq!(display_name("kota blue"), "Kota blue");
        assert_eq!(display_name(""), "");
    }

    #[test]
    fn test_category_image_lookup() {
        assert!(category_image("kitchen").contains("photo-1556909114"));
        assert_eq!(category_image("granite"), GENERIC_CATEGORY_IMAGE);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(45.0), "\u{00a3}45.00");
        assert_eq!(format_price(38.5), "\u{00a3}38.50");
        assert_eq!(format_price(120.0), "\u{00a3}120.00");
    }
}
