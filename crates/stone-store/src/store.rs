//! The document store trait.

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use serde_json::{Map, Value};

use crate::document::Document;
use crate::error::StoreResult;
use crate::order::OrderBy;

/// A real-time feed of a collection.
///
/// Each item is the entire current document set, never a diff. Consumers
/// rebuild their state wholesale from every push.
pub type CollectionWatch = BoxStream<'static, Vec<Document>>;

/// Remote document database seam.
///
/// Implementations wrap whatever the deployment actually talks to; the
/// platform only ever programs against this trait. All reads may fail with
/// a backend error, which the catalog loader absorbs into its fallback
/// cascade. Writes surface their errors to the caller.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// List every document in a collection, backend order.
    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>>;

    /// List every document in a collection with an explicit ordering.
    ///
    /// Documents missing the order field sort after all documents that
    /// carry it, regardless of direction.
    async fn list_ordered(&self, collection: &str, order: &OrderBy) -> StoreResult<Vec<Document>>;

    /// List documents whose `field` equals `value`.
    async fn filtered(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> StoreResult<Vec<Document>>;

    /// Fetch one document by id.
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>>;

    /// Insert a new document, returning its assigned id.
    async fn add(&self, collection: &str, fields: Map<String, Value>) -> StoreResult<String>;

    /// Merge fields into an existing document.
    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> StoreResult<()>;

    /// Delete a document by id.
    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()>;

    /// Number of documents in a collection.
    async fn count(&self, collection: &str) -> StoreResult<usize>;

    /// True when a collection holds no documents.
    async fn is_empty(&self, collection: &str) -> StoreResult<bool> {
        Ok(self.count(collection).await? == 0)
    }

    /// Subscribe to a collection.
    ///
    /// Backends without real-time support return an empty stream; the
    /// storefront then relies on explicit reloads.
    fn watch(&self, _collection: &str) -> CollectionWatch {
        futures::stream::empty().boxed()
    }
}
