//! Sample data seeding for empty backends.
//!
//! A freshly provisioned store has nothing to sell. Seeding inserts a
//! starter catalog, but only into collections that are actually empty; a
//! populated backend is never written to.

use serde_json::{json, Map, Value};

use stone_store::{DocumentStore, StoreResult};

use crate::{CATEGORIES_COLLECTION, PRODUCTS_COLLECTION};

/// What a seeding pass created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Categories inserted (0 when the collection was already populated).
    pub categories_created: usize,
    /// Products inserted (0 when the collection was already populated).
    pub products_created: usize,
}

impl SeedReport {
    /// True when the pass inserted nothing.
    pub fn is_noop(&self) -> bool {
        self.categories_created == 0 && self.products_created == 0
    }
}

/// Seed sample data into whichever catalog collections are empty.
///
/// Each collection is checked independently, so a store with categories but
/// no products only gains products. Running this twice is a no-op.
pub async fn ensure_seed_data<S: DocumentStore + ?Sized>(store: &S) -> StoreResult<SeedReport> {
    let mut report = SeedReport::default();

    if store.is_empty(CATEGORIES_COLLECTION).await? {
        for fields in sample_categories() {
            store.add(CATEGORIES_COLLECTION, fields).await?;
            report.categories_created += 1;
        }
    }

    if store.is_empty(PRODUCTS_COLLECTION).await? {
        for fields in sample_products() {
            store.add(PRODUCTS_COLLECTION, fields).await?;
            report.products_created += 1;
        }
    }

    Ok(report)
}

/// The six starter categories.
pub fn sample_categories() -> Vec<Map<String, Value>> {
    let now = current_timestamp();
    vec![
        object(json!({
            "name": "Flooring",
            "type": "flooring",
            "image": "https://images.unsplash.com/photo-1586023492125-27b2c045efd7?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=600&q=80",
            "description": "Premium stone flooring solutions for homes and commercial spaces",
            "created_at": now,
        })),
        object(json!({
            "name": "Wall Decoration",
            "type": "wall",
            "image": "https://images.unsplash.com/photo-1600607687939-ce8a6c25118c?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=600&q=80",
            "description": "Wall cladding and decorative stone solutions",
            "created_at": now,
        })),
        object(json!({
            "name": "Bathroom",
            "type": "bathroom",
            "image": "https://images.unsplash.com/photo-1600607687920-26eb2c5fab6a?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=600&q=80",
            "description": "Bathroom stone tiles and solutions",
            "created_at": now,
        })),
        object(json!({
            "name": "Outdoor",
            "type": "outdoor",
            "image": "https://images.unsplash.com/photo-1600585154340-2e5db6e509e9?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=600&q=80",
            "description": "Outdoor stone paving and landscaping",
            "created_at": now,
        })),
        object(json!({
            "name": "Kitchen",
            "type": "kitchen",
            "image": "https://images.unsplash.com/photo-1556909114-f6e7ad7d3136?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=600&q=80",
            "description": "Kitchen countertops and stone surfaces",
            "created_at": now,
        })),
        object(json!({
            "name": "Commercial",
            "type": "commercial",
            "image": "https://images.unsplash.com/photo-1497366754035-f200968a6e72?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=600&q=80",
            "description": "Commercial stone projects and installations",
            "created_at": now,
        })),
    ]
}

/// The six starter products, full spec sheets included.
///
/// Creation timestamps are staggered so newest-first ordering is stable.
pub fn sample_products() -> Vec<Map<String, Value>> {
    let base = current_timestamp();
    let sheets = vec![
        object(json!({
            "name": "Kota Blue Stone",
            "stone_name": "Kota Blue",
            "category": "flooring",
            "type": "Natural Stone",
            "price": "\u{00a3}45.00",
            "price_unit": "sqft",
            "image": "https://images.unsplash.com/photo-1586023492125-27b2c045efd7?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=400&q=80",
            "description": "Premium quality kota stone for flooring with natural blue tones. Perfect for indoor and outdoor flooring applications.",
            "color": "Blue",
            "thickness": "20-30 mm",
            "size": "Custom Sizes",
            "finish": "Natural",
            "usage": "Flooring, Pavement",
            "water_absorption": "2-3%",
            "density": "2.4-2.6 g/cm\u{b3}",
            "compressive_strength": "1800-2200 kg/cm\u{b2}",
            "status": "active",
        })),
        object(json!({
            "name": "Raj Green Sandstone",
            "stone_name": "Raj Green",
            "category": "flooring",
            "type": "Calibrated",
            "price": "\u{00a3}38.00",
            "price_unit": "sqft",
            "image": "https://images.unsplash.com/photo-1600585154340-2e5db6e509e9?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=400&q=80",
            "description": "Beautiful green sandstone with natural patterns. Ideal for flooring and wall cladding.",
            "color": "Green",
            "thickness": "15-25 mm",
            "size": "Standard Tiles",
            "finish": "Honed",
            "usage": "Flooring, Wall Cladding",
            "water_absorption": "3-4%",
            "density": "2.3-2.5 g/cm\u{b3}",
            "compressive_strength": "1600-2000 kg/cm\u{b2}",
            "status": "active",
        })),
        object(json!({
            "name": "White Marble Tiles",
            "stone_name": "White Marble",
            "category": "bathroom",
            "type": "Polished",
            "price": "\u{00a3}75.00",
            "price_unit": "sqft",
            "image": "https://images.unsplash.com/photo-1600607687939-ce8a6c25118c?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=400&q=80",
            "description": "Luxury white marble tiles perfect for bathroom walls and floors. Elegant and durable.",
            "color": "White",
            "thickness": "10-15 mm",
            "size": "12x12, 24x24 inches",
            "finish": "Polished",
            "usage": "Bathroom Walls, Flooring",
            "water_absorption": "0.5-1%",
            "density": "2.7-2.9 g/cm\u{b3}",
            "compressive_strength": "2500-3000 kg/cm\u{b2}",
            "status": "active",
        })),
        object(json!({
            "name": "Black Galaxy Granite",
            "stone_name": "Black Galaxy",
            "category": "kitchen",
            "type": "Polished",
            "price": "\u{00a3}120.00",
            "price_unit": "sqft",
            "image": "https://images.unsplash.com/photo-1556909114-f6e7ad7d3136?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=400&q=80",
            "description": "Premium black granite with golden speckles. Perfect for kitchen countertops.",
            "color": "Black with Gold",
            "thickness": "20-30 mm",
            "size": "Slabs, Custom Cut",
            "finish": "Polished",
            "usage": "Kitchen Countertops",
            "water_absorption": "0.2-0.5%",
            "density": "2.9-3.1 g/cm\u{b3}",
            "compressive_strength": "2800-3200 kg/cm\u{b2}",
            "status": "active",
        })),
        object(json!({
            "name": "Kota Brown Limestone",
            "stone_name": "Kota Brown",
            "category": "wall",
            "type": "Natural",
            "price": "\u{00a3}55.00",
            "price_unit": "sqft",
            "image": "https://images.unsplash.com/photo-1600607687939-ce8a6c25118c?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=400&q=80",
            "description": "Natural brown limestone for wall cladding and feature walls.",
            "color": "Brown",
            "thickness": "15-20 mm",
            "size": "Random Patterns",
            "finish": "Natural",
            "usage": "Wall Cladding, Feature Walls",
            "water_absorption": "2-3%",
            "density": "2.5-2.7 g/cm\u{b3}",
            "compressive_strength": "2000-2400 kg/cm\u{b2}",
            "status": "active",
        })),
        object(json!({
            "name": "Dholpur Stone",
            "stone_name": "Dholpur Red",
            "category": "commercial",
            "type": "Calibrated",
            "price": "\u{00a3}40.00",
            "price_unit": "sqft",
            "image": "https://images.unsplash.com/photo-1497366754035-f200968a6e72?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=400&q=80",
            "description": "Durable Dholpur stone for commercial flooring and outdoor applications.",
            "color": "Red",
            "thickness": "25-35 mm",
            "size": "Commercial Slabs",
            "finish": "Calibrated",
            "usage": "Commercial Flooring, Outdoor",
            "water_absorption": "3-4%",
            "density": "2.4-2.6 g/cm\u{b3}",
            "compressive_strength": "1700-2100 kg/cm\u{b2}",
            "status": "active",
        })),
    ];

    sheets
        .into_iter()
        .enumerate()
        .map(|(index, mut fields)| {
            fields.insert("created_at".to_string(), json!(base + index as i64));
            fields
        })
        .collect()
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
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
