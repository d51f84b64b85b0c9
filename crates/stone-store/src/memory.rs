//! In-memory document store for development and tests.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use futures::channel::mpsc;
use futures::StreamExt;
use serde_json::{Map, Value};

use crate::document::Document;
use crate::error::{StoreError, StoreResult};
use crate::order::{sort_documents, OrderBy};
use crate::store::{CollectionWatch, DocumentStore};

/// A full store dataset, keyed by collection name. Serializes to plain JSON
/// for file-backed persistence in the dev CLI.
pub type Dataset = BTreeMap<String, Vec<Document>>;

/// In-memory [`DocumentStore`] backend.
///
/// Holds collections behind a mutex, assigns monotonic `doc_N` ids, and
/// supports per-collection failure injection so degraded loader paths can
/// be exercised without a broken backend.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    collections: HashMap<String, Vec<Document>>,
    failing: HashSet<String>,
    watchers: HashMap<String, Vec<mpsc::UnboundedSender<Vec<Document>>>>,
    next_id: u64,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated from a dataset.
    pub fn from_dataset(dataset: Dataset) -> Self {
        let store = Self::new();
        store.import(dataset);
        store
    }

    /// Replace the entire store contents with a dataset.
    pub fn import(&self, dataset: Dataset) {
        let mut inner = self.lock();
        inner.collections = dataset.into_iter().collect();
        let collections: Vec<String> = inner.collections.keys().cloned().collect();
        for collection in collections {
            notify_watchers(&mut inner, &collection);
        }
    }

    /// Snapshot the entire store contents.
    pub fn export(&self) -> Dataset {
        let inner = self.lock();
        inner
            .collections
            .iter()
            .map(|(name, docs)| (name.clone(), docs.clone()))
            .collect()
    }

    /// Make every operation on a collection fail as unreachable.
    pub fn fail_collection(&self, collection: &str) {
        self.lock().failing.insert(collection.to_string());
    }

    /// Undo [`MemoryStore::fail_collection`].
    pub fn restore_collection(&self, collection: &str) {
        self.lock().failing.remove(collection);
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn checked(&self, collection: &str) -> StoreResult<MutexGuard<'_, Inner>> {
        let inner = self.lock();
        if inner.failing.contains(collection) {
            return Err(StoreError::Unreachable(format!(
                "collection {} is offline",
                collection
            )));
        }
        Ok(inner)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>> {
        let inner = self.checked(collection)?;
        Ok(inner.collections.get(collection).cloned().unwrap_or_default())
    }

    async fn list_ordered(&self, collection: &str, order: &OrderBy) -> StoreResult<Vec<Document>> {
        let mut docs = self.list(collection).await?;
        sort_documents(&mut docs, order);
        Ok(docs)
    }

    async fn filtered(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> StoreResult<Vec<Document>> {
        let mut docs = self.list(collection).await?;
        docs.retain(|doc| loosely_equal(doc.get(field), value));
        Ok(docs)
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let inner = self.checked(collection)?;
        Ok(inner
            .collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned())
    }

    async fn add(&self, collection: &str, fields: Map<String, Value>) -> StoreResult<String> {
        let mut inner = self.checked(collection)?;
        let id = next_doc_id(&mut inner, collection);
        inner
            .collections
            .entry(collection.to_string())
            .or_default()
            .push(Document::from_fields(id.clone(), fields));
        notify_watchers(&mut inner, collection);
        Ok(id)
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> StoreResult<()> {
        let mut inner = self.checked(collection)?;
        let doc = inner
            .collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
            .ok_or_else(|| StoreError::not_found(collection, id))?;
        for (key, value) in fields {
            doc.fields.insert(key, value);
        }
        notify_watchers(&mut inner, collection);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        let mut inner = self.checked(collection)?;
        let docs = inner
            .collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::not_found(collection, id))?;
        let before = docs.len();
        docs.retain(|d| d.id != id);
        if docs.len() == before {
            return Err(StoreError::not_found(collection, id));
        }
        notify_watchers(&mut inner, collection);
        Ok(())
    }

    async fn count(&self, collection: &str) -> StoreResult<usize> {
        let inner = self.checked(collection)?;
        Ok(inner.collections.get(collection).map_or(0, Vec::len))
    }

    fn watch(&self, collection: &str) -> CollectionWatch {
        let (tx, rx) = mpsc::unbounded();
        let mut inner = self.lock();
        let current = inner.collections.get(collection).cloned().unwrap_or_default();
        // Initial push mirrors the remote SDK: subscribers start from the
        // current snapshot, then receive the full set on every change.
        let _ = tx.unbounded_send(current);
        inner
            .watchers
            .entry(collection.to_string())
            .or_default()
            .push(tx);
        rx.boxed()
    }
}

fn next_doc_id(inner: &mut Inner, collection: &str) -> String {
    loop {
        inner.next_id += 1;
        let id = format!("doc_{}", inner.next_id);
        let taken = inner
            .collections
            .get(collection)
            .is_some_and(|docs| docs.iter().any(|d| d.id == id));
        if !taken {
            return id;
        }
    }
}

fn notify_watchers(inner: &mut Inner, collection: &str) {
    let docs = inner.collections.get(collection).cloned().unwrap_or_default();
    if let Some(watchers) = inner.watchers.get_mut(collection) {
        watchers.retain(|tx| tx.unbounded_send(docs.clone()).is_ok());
    }
}

fn loosely_equal(actual: Option<&Value>, expected: &Value) -> bool {
    match actual {
        Some(v) if v == expected => true,
        Some(v) => match (v.as_f64(), expected.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{Direction, OrderField};
    use serde_json::json;

    fn fields(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[tokio::test]
    async fn test_add_get_update_delete() {
        let store = MemoryStore::new();

        let id = store
            .add("products", fields(&[("name", json!("Kota Blue"))]))
            .await
            .unwrap();
        assert_eq!(id, "doc_1");

        let doc = store.get("products", &id).await.unwrap().unwrap();
        assert_eq!(doc.str_field("name"), Some("Kota Blue"));

        store
            .update("products", &id, fields(&[("status", json!("posted"))]))
            .await
            .unwrap();
        let doc = store.get("products", &id).await.unwrap().unwrap();
        assert_eq!(doc.str_field("status"), Some("posted"));
        assert_eq!(doc.str_field("name"), Some("Kota Blue"));

        store.delete("products", &id).await.unwrap();
        assert!(store.get("products", &id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .update("products", "ghost", Map::new())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_ordered_newest_first() {
        let store = MemoryStore::new();
        store
            .add("products", fields(&[("name", json!("old")), ("created_at", json!(100))]))
            .await
            .unwrap();
        store
            .add("products", fields(&[("name", json!("new")), ("created_at", json!(300))]))
            .await
            .unwrap();
        store
            .add("products", fields(&[("name", json!("mid")), ("created_at", json!(200))]))
            .await
            .unwrap();

        let docs = store
            .list_ordered("products", &OrderBy::newest_first(OrderField::CreatedAt))
            .await
            .unwrap();
        let names: Vec<&str> = docs.iter().filter_map(|d| d.str_field("name")).collect();
        assert_eq!(names, vec!["new", "mid", "old"]);
    }

    #[tokio::test]
    async fn test_ordering_field_is_honored() {
        let store = MemoryStore::new();
        store
            .add(
                "products",
                fields(&[("name", json!("a")), ("created_at", json!(1)), ("timestamp", json!(9))]),
            )
            .await
            .unwrap();
        store
            .add(
                "products",
                fields(&[("name", json!("b")), ("created_at", json!(2)), ("timestamp", json!(8))]),
            )
            .await
            .unwrap();

        let by_created = store
            .list_ordered("products", &OrderBy::newest_first(OrderField::CreatedAt))
            .await
            .unwrap();
        assert_eq!(by_created[0].str_field("name"), Some("b"));

        let by_timestamp = store
            .list_ordered("products", &OrderBy::newest_first(OrderField::Timestamp))
            .await
            .unwrap();
        assert_eq!(by_timestamp[0].str_field("name"), Some("a"));
    }

    #[tokio::test]
    async fn test_missing_order_field_sorts_last() {
        let store = MemoryStore::new();
        store
            .add("products", fields(&[("name", json!("unstamped"))]))
            .await
            .unwrap();
        store
            .add("products", fields(&[("name", json!("stamped")), ("created_at", json!(50))]))
            .await
            .unwrap();

        for direction in [Direction::Ascending, Direction::Descending] {
            let docs = store
                .list_ordered(
                    "products",
                    &OrderBy::new(OrderField::CreatedAt, direction),
                )
                .await
                .unwrap();
            assert_eq!(docs.last().unwrap().str_field("name"), Some("unstamped"));
        }
    }

    #[tokio::test]
    async fn test_filtered_matches_strings_and_numbers() {
        let store = MemoryStore::new();
        store
            .add("products", fields(&[("category", json!("flooring")), ("n", json!(1))]))
            .await
            .unwrap();
        store
            .add("products", fields(&[("category", json!("kitchen")), ("n", json!(1.0))]))
            .await
            .unwrap();

        let flooring = store
            .filtered("products", "category", &json!("flooring"))
            .await
            .unwrap();
        assert_eq!(flooring.len(), 1);

        // Integer and float forms of the same number match.
        let ones = store.filtered("products", "n", &json!(1)).await.unwrap();
        assert_eq!(ones.len(), 2);
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let store = MemoryStore::new();
        store.fail_collection("products");

        let err = store.list("products").await.unwrap_err();
        assert!(err.is_unreachable());
        let err = store.add("products", Map::new()).await.unwrap_err();
        assert!(err.is_unreachable());

        // Other collections keep working.
        assert!(store.list("categories").await.is_ok());

        store.restore_collection("products");
        assert!(store.list("products").await.is_ok());
    }

    #[tokio::test]
    async fn test_export_import_round_trip() {
        let store = MemoryStore::new();
        store
            .add("products", fields(&[("name", json!("Kota Blue"))]))
            .await
            .unwrap();
        store
            .add("categories", fields(&[("type", json!("flooring"))]))
            .await
            .unwrap();

        let dataset = store.export();
        let restored = MemoryStore::from_dataset(dataset);
        assert_eq!(restored.count("products").await.unwrap(), 1);
        assert_eq!(restored.count("categories").await.unwrap(), 1);

        let doc = restored.get("products", "doc_1").await.unwrap().unwrap();
        assert_eq!(doc.str_field("name"), Some("Kota Blue"));
    }

    #[tokio::test]
    async fn test_imported_ids_never_collide() {
        let mut dataset = Dataset::new();
        dataset.insert(
            "products".to_string(),
            vec![Document::new("doc_1").with_field("name", "existing")],
        );
        let store = MemoryStore::from_dataset(dataset);

        let id = store.add("products", Map::new()).await.unwrap();
        assert_ne!(id, "doc_1");
        assert_eq!(store.count("products").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_watch_pushes_whole_collection() {
        let store = MemoryStore::new();
        store
            .add("products", fields(&[("name", json!("first"))]))
            .await
            .unwrap();

        let mut watch = store.watch("products");

        let initial = watch.next().await.unwrap();
        assert_eq!(initial.len(), 1);

        store
            .add("products", fields(&[("name", json!("second"))]))
            .await
            .unwrap();

        // Every push carries the full set, not a diff.
        let pushed = watch.next().await.unwrap();
        assert_eq!(pushed.len(), 2);
    }
}
