//! Product model and normalization.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use stone_store::Document;

use crate::ids::ProductId;
use crate::tables::{
    format_price, NO_DESCRIPTION, PLACEHOLDER_PRODUCT_IMAGE, PRICE_NOT_SET, UNCATEGORIZED,
    UNNAMED_PRODUCT,
};

/// A render-ready product.
///
/// Every field is guaranteed displayable after [`Product::from_document`]:
/// names and categories are never empty, prices and descriptions fall back
/// to fixed sentinels, and the image is always a URL. Source fields the
/// model does not interpret ride along in `extra` unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Document id from the store.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Lowercase category tag.
    pub category: String,
    /// Display price, already formatted, or the not-set sentinel.
    pub price: String,
    /// Primary image URL.
    pub image: String,
    /// Display description.
    pub description: String,
    /// Trade name of the stone, when recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stone_name: Option<String>,
    /// Product type, e.g. "Natural Stone" or "Polished".
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// All other source fields, preserved as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Source fields consumed into typed form; everything else is passed
/// through in `extra`.
const NORMALIZED_FIELDS: &[&str] = &[
    "name",
    "category",
    "price",
    "image",
    "description",
    "stone_name",
    "type",
];

impl Product {
    /// Create a product with the minimum displayable fields.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            price: PRICE_NOT_SET.to_string(),
            image: PLACEHOLDER_PRODUCT_IMAGE.to_string(),
            description: NO_DESCRIPTION.to_string(),
            stone_name: None,
            kind: None,
            extra: Map::new(),
        }
    }

    /// Set the display price.
    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = price.into();
        self
    }

    /// Set the image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the stone name.
    pub fn with_stone_name(mut self, stone_name: impl Into<String>) -> Self {
        self.stone_name = Some(stone_name.into());
        self
    }

    /// Set the product type.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Normalize a raw store document into a displayable product.
    ///
    /// Malformed or missing fields degrade to fixed defaults; this never
    /// fails. The rules, in order:
    ///
    /// - name:   `stone_name`, else `name`, else `"Unnamed Product"`
    /// - category: `category`, else `"uncategorized"`
    /// - price:  numbers format as GBP, strings pass through, else the
    ///   not-set sentinel
    /// - image:  first usable entry of `images`, else `image`, else
    ///   `imageUrl`, else the placeholder
    /// - description: `description`, else `"No description available"`
    pub fn from_document(doc: &Document) -> Self {
        let name = doc
            .text_field("stone_name")
            .or_else(|| doc.text_field("name"))
            .unwrap_or(UNNAMED_PRODUCT)
            .to_string();

        let category = doc
            .text_field("category")
            .unwrap_or(UNCATEGORIZED)
            .to_string();

        let price = match doc.get("price") {
            Some(Value::Number(n)) => n
                .as_f64()
                .map(format_price)
                .unwrap_or_else(|| PRICE_NOT_SET.to_string()),
            Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
            _ => PRICE_NOT_SET.to_string(),
        };

        let image = doc
            .array_field("images")
            .and_then(|images| {
                images
                    .iter()
                    .find_map(|v| v.as_str().filter(|s| !s.trim().is_empty()))
            })
            .or_else(|| doc.text_field("image"))
            .or_else(|| doc.text_field("imageUrl"))
            .unwrap_or(PLACEHOLDER_PRODUCT_IMAGE)
            .to_string();

        let description = doc
            .text_field("description")
            .unwrap_or(NO_DESCRIPTION)
            .to_string();

        let stone_name = doc.text_field("stone_name").map(str::to_string);
        let kind = doc.text_field("type").map(str::to_string);

        let extra: Map<String, Value> = doc
            .fields
            .iter()
            .filter(|(key, _)| !NORMALIZED_FIELDS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Self {
            id: ProductId::new(doc.id.clone()),
            name,
            category,
            price,
            image,
            description,
            stone_name,
            kind,
            extra,
        }
    }

    /// The lifecycle status carried in the source document, if any.
    pub fn status(&self) -> Option<&str> {
        self.extra.get("status").and_then(Value::as_str)
    }
}
