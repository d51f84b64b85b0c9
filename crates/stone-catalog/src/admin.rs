//! Product administration.
//!
//! The write side of the catalog. Unlike the read path, nothing here fails
//! open: every error is surfaced to the caller with a message fit for the
//! person editing the catalog, and no operation is retried. When a product
//! carries an image, the image is uploaded before any document is written,
//! so a failed upload never leaves a product pointing at a missing blob.

use std::sync::Arc;

use serde_json::{Map, Value};

use stone_media::{BlobStore, ImageUpload};
use stone_observability::StructuredLogger;
use stone_store::{sort_documents, DocumentStore, OrderBy};

use crate::error::AdminError;
use crate::ids::ProductId;
use crate::product::Product;
use crate::PRODUCTS_COLLECTION;

/// Lifecycle status stamped on product documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductStatus {
    /// Listed and editable.
    #[default]
    Active,
    /// Published to the storefront.
    Posted,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Active => "active",
            ProductStatus::Posted => "posted",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProductStatus::Active => "Active",
            ProductStatus::Posted => "Posted",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(ProductStatus::Active),
            "posted" => Some(ProductStatus::Posted),
            _ => None,
        }
    }
}

/// A new product as entered in the admin form.
///
/// Only `name` and `category` are required; everything else is optional and
/// stored as given. Specification details (colour, thickness, finish and so
/// on) travel in `details` and land on the document as flat fields.
#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    pub name: String,
    pub stone_name: Option<String>,
    pub category: String,
    pub kind: Option<String>,
    pub price: Option<f64>,
    pub price_unit: Option<String>,
    pub description: Option<String>,
    pub details: Map<String, Value>,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            ..Self::default()
        }
    }

    pub fn with_stone_name(mut self, stone_name: impl Into<String>) -> Self {
        self.stone_name = Some(stone_name.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_price_unit(mut self, unit: impl Into<String>) -> Self {
        self.price_unit = Some(unit.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Reject drafts that would produce an unusable listing.
    pub fn validate(&self) -> Result<(), AdminError> {
        if self.name.trim().is_empty() {
            return Err(AdminError::InvalidDraft(
                "Product name is required.".to_string(),
            ));
        }
        if self.category.trim().is_empty() {
            return Err(AdminError::InvalidDraft(
                "Product category is required.".to_string(),
            ));
        }
        if let Some(price) = self.price {
            if !price.is_finite() || price < 0.0 {
                return Err(AdminError::InvalidDraft(
                    "Price must be a non-negative number.".to_string(),
                ));
            }
        }
        Ok(())
    }

    fn into_fields(self, image_url: Option<String>, now: i64) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("name".to_string(), Value::from(self.name));
        fields.insert("category".to_string(), Value::from(self.category));
        if let Some(stone_name) = self.stone_name {
            fields.insert("stone_name".to_string(), Value::from(stone_name));
        }
        if let Some(kind) = self.kind {
            fields.insert("type".to_string(), Value::from(kind));
        }
        if let Some(price) = self.price {
            fields.insert("price".to_string(), Value::from(price));
        }
        if let Some(unit) = self.price_unit {
            fields.insert("price_unit".to_string(), Value::from(unit));
        }
        if let Some(description) = self.description {
            fields.insert("description".to_string(), Value::from(description));
        }
        if let Some(url) = image_url {
            fields.insert("image".to_string(), Value::from(url));
        }
        for (key, value) in self.details {
            fields.insert(key, value);
        }
        fields.insert(
            "status".to_string(),
            Value::from(ProductStatus::Active.as_str()),
        );
        fields.insert("created_at".to_string(), Value::from(now));
        fields.insert("updated_at".to_string(), Value::from(now));
        fields
    }
}

/// Catalog write operations.
pub struct ProductAdmin<S: DocumentStore + ?Sized, B: BlobStore + ?Sized> {
    store: Arc<S>,
    blobs: Arc<B>,
    order: OrderBy,
    logger: StructuredLogger,
}

impl<S: DocumentStore + ?Sized, B: BlobStore + ?Sized> ProductAdmin<S, B> {
    pub fn new(store: Arc<S>, blobs: Arc<B>) -> Self {
        Self {
            store,
            blobs,
            order: OrderBy::default(),
            logger: StructuredLogger::new("product-admin"),
        }
    }

    /// Use a specific recency field for filtered reads.
    pub fn with_order(mut self, order: OrderBy) -> Self {
        self.order = order;
        self
    }

    pub fn with_logger(mut self, logger: StructuredLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Add a product, uploading its image first.
    pub async fn add_product(
        &self,
        draft: ProductDraft,
        image: Option<ImageUpload>,
    ) -> Result<ProductId, AdminError> {
        draft.validate()?;

        let image_url = match image {
            Some(upload) => Some(self.upload_image(upload).await?),
            None => None,
        };

        let name = draft.name.clone();
        let fields = draft.into_fields(image_url, current_timestamp());
        let id = self.store.add(PRODUCTS_COLLECTION, fields).await?;

        self.logger
            .with_collection(PRODUCTS_COLLECTION)
            .info_builder("product added")
            .field("id", &id)
            .field("name", name)
            .emit();

        Ok(ProductId::new(id))
    }

    /// Merge changes into an existing product.
    ///
    /// A new image replaces the stored URL; the old blob is not deleted, the
    /// document simply stops pointing at it.
    pub async fn update_product(
        &self,
        id: &ProductId,
        mut changes: Map<String, Value>,
        image: Option<ImageUpload>,
    ) -> Result<(), AdminError> {
        if let Some(upload) = image {
            let url = self.upload_image(upload).await?;
            changes.insert("image".to_string(), Value::from(url));
        }
        changes.insert(
            "updated_at".to_string(),
            Value::from(current_timestamp()),
        );

        self.store
            .update(PRODUCTS_COLLECTION, id.as_str(), changes)
            .await?;

        self.logger
            .with_collection(PRODUCTS_COLLECTION)
            .info_builder("product updated")
            .field("id", id.as_str())
            .emit();

        Ok(())
    }

    /// Delete a product document.
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), AdminError> {
        self.store
            .delete(PRODUCTS_COLLECTION, id.as_str())
            .await?;

        self.logger
            .with_collection(PRODUCTS_COLLECTION)
            .info_builder("product deleted")
            .field("id", id.as_str())
            .emit();

        Ok(())
    }

    /// Flip a product's status to `posted`.
    pub async fn mark_posted(&self, id: &ProductId) -> Result<(), AdminError> {
        let mut changes = Map::new();
        changes.insert(
            "status".to_string(),
            Value::from(ProductStatus::Posted.as_str()),
        );
        changes.insert(
            "updated_at".to_string(),
            Value::from(current_timestamp()),
        );

        self.store
            .update(PRODUCTS_COLLECTION, id.as_str(), changes)
            .await?;

        self.logger
            .with_collection(PRODUCTS_COLLECTION)
            .info_builder("product posted")
            .field("id", id.as_str())
            .emit();

        Ok(())
    }

    /// Products carrying a category tag, ordered by the configured recency
    /// field.
    pub async fn products_by_category(&self, tag: &str) -> Result<Vec<Product>, AdminError> {
        self.filtered("category", tag).await
    }

    /// Products of a given type, ordered by the configured recency field.
    pub async fn products_by_kind(&self, kind: &str) -> Result<Vec<Product>, AdminError> {
        self.filtered("type", kind).await
    }

    async fn filtered(&self, field: &str, value: &str) -> Result<Vec<Product>, AdminError> {
        let mut docs = self
            .store
            .filtered(PRODUCTS_COLLECTION, field, &Value::from(value))
            .await?;
        sort_documents(&mut docs, &self.order);
        Ok(docs.iter().map(Product::from_document).collect())
    }

    async fn upload_image(&self, upload: ImageUpload) -> Result<String, AdminError> {
        let key = upload.key_at(current_timestamp_ms());
        let url = self
            .blobs
            .upload(&key, upload.bytes, &upload.content_type)
            .await?;

        self.logger
            .info_builder("image uploaded")
            .field("key", key)
            .emit();

        Ok(url)
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

fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    use stone_media::MemoryBlobStore;
    use stone_store::MemoryStore;

    fn admin() -> (
        Arc<MemoryStore>,
        Arc<MemoryBlobStore>,
        ProductAdmin<MemoryStore, MemoryBlobStore>,
    ) {
        let store = Arc::new(MemoryStore::new());
        let blobs = Arc::new(MemoryBlobStore::new());
        let admin = ProductAdmin::new(store.clone(), blobs.clone());
        (store, blobs, admin)
    }

    fn draft() -> ProductDraft {
        ProductDraft::new("Kota Blue Stone", "flooring")
            .with_stone_name("Kota Blue")
            .with_kind("Natural Stone")
            .with_price(45.0)
            .with_price_unit("sqft")
            .with_description("Premium quality natural stone")
            .with_detail("color", "Blue-Grey")
            .with_detail("finish", "Honed")
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(ProductStatus::default().as_str(), "active");
        assert_eq!(ProductStatus::parse("posted"), Some(ProductStatus::Posted));
        assert_eq!(ProductStatus::Posted.display_name(), "Posted");
        assert!(ProductStatus::parse("archived").is_none());
    }

    #[tokio::test]
    async fn test_add_product_writes_full_document() {
        let (store, _, admin) = admin();

        let id = admin.add_product(draft(), None).await.unwrap();

        let doc = store
            .get(PRODUCTS_COLLECTION, id.as_str())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(doc.str_field("name"), Some("Kota Blue Stone"));
        assert_eq!(doc.str_field("stone_name"), Some("Kota Blue"));
        assert_eq!(doc.str_field("type"), Some("Natural Stone"));
        assert_eq!(doc.f64_field("price"), Some(45.0));
        assert_eq!(doc.str_field("status"), Some("active"));
        assert_eq!(doc.str_field("color"), Some("Blue-Grey"));
        assert!(doc.i64_field("created_at").is_some());
        assert!(doc.i64_field("updated_at").is_some());
    }

    #[tokio::test]
    async fn test_add_product_uploads_image_before_writing() {
        let (store, _, admin) = admin();
        let upload = ImageUpload::new("kota.jpg", "image/jpeg", vec![1, 2, 3]);

        let id = admin.add_product(draft(), Some(upload)).await.unwrap();

        let doc = store
            .get(PRODUCTS_COLLECTION, id.as_str())
            .await
            .unwrap()
            .unwrap();
        let image = doc.str_field("image").unwrap();
        assert!(image.starts_with("memory://products/"));
        assert!(image.ends_with("_kota.jpg"));
    }

    #[tokio::test]
    async fn test_failed_upload_aborts_the_save() {
        let (store, blobs, admin) = admin();
        blobs.fail_uploads();
        let upload = ImageUpload::new("kota.jpg", "image/jpeg", vec![1, 2, 3]);

        let err = admin.add_product(draft(), Some(upload)).await.unwrap_err();

        assert!(matches!(err, AdminError::ImageUpload(_)));
        assert_eq!(
            err.user_message(),
            "Image upload failed. The product was not saved."
        );
        // Nothing was written.
        assert_eq!(store.count(PRODUCTS_COLLECTION).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected_before_any_write() {
        let (store, _, admin) = admin();

        let err = admin
            .add_product(ProductDraft::new("  ", "flooring"), None)
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "Product name is required.");
        assert_eq!(store.count(PRODUCTS_COLLECTION).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_negative_price_is_rejected() {
        let (_, _, admin) = admin();

        let err = admin
            .add_product(draft().with_price(-1.0), None)
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "Price must be a non-negative number.");
    }

    #[tokio::test]
    async fn test_update_merges_changes() {
        let (store, _, admin) = admin();
        let id = admin.add_product(draft(), None).await.unwrap();

        let mut changes = Map::new();
        changes.insert("price".to_string(), json!(55));
        admin.update_product(&id, changes, None).await.unwrap();

        let doc = store
            .get(PRODUCTS_COLLECTION, id.as_str())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(doc.f64_field("price"), Some(55.0));
        // Untouched fields survive the merge.
        assert_eq!(doc.str_field("name"), Some("Kota Blue Stone"));
    }

    #[tokio::test]
    async fn test_mark_posted_flips_status() {
        let (store, _, admin) = admin();
        let id = admin.add_product(draft(), None).await.unwrap();

        admin.mark_posted(&id).await.unwrap();

        let doc = store
            .get(PRODUCTS_COLLECTION, id.as_str())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(doc.str_field("status"), Some("posted"));
    }

    #[tokio::test]
    async fn test_delete_missing_product_is_surfaced() {
        let (_, _, admin) = admin();

        let err = admin
            .delete_product(&ProductId::new("ghost"))
            .await
            .unwrap_err();

        assert!(matches!(err, AdminError::ProductNotFound(_)));
        assert_eq!(err.user_message(), "That product no longer exists.");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_surfaced_not_swallowed() {
        let (store, _, admin) = admin();
        store.fail_collection(PRODUCTS_COLLECTION);

        let err = admin.add_product(draft(), None).await.unwrap_err();

        assert!(matches!(err, AdminError::Unreachable(_)));
        assert_eq!(
            err.user_message(),
            "Network error. Please check your connection."
        );
    }

    #[tokio::test]
    async fn test_filtered_reads_order_newest_first() {
        let (store, _, admin) = admin();

        // Stamp created_at explicitly so the test does not depend on the clock.
        for (name, category, stamp) in [
            ("Older", "flooring", 100),
            ("Other", "bathroom", 400),
            ("Newest", "flooring", 300),
            ("Middle", "flooring", 200),
        ] {
            let mut fields = Map::new();
            fields.insert("name".to_string(), json!(name));
            fields.insert("category".to_string(), json!(category));
            fields.insert("created_at".to_string(), json!(stamp));
            store.add(PRODUCTS_COLLECTION, fields).await.unwrap();
        }

        let products = admin.products_by_category("flooring").await.unwrap();

        let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Newest", "Middle", "Older"]);
    }
}
