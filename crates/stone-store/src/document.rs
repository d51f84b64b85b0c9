//! Loosely-typed documents.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A document from the remote store: an id plus an open field bag.
///
/// Catalog records arrive with uneven shapes (admin tools, seed scripts and
/// older imports all wrote slightly different fields), so the store layer
/// never imposes a schema. Normalization into typed models happens in
/// `stone-catalog`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document id, unique within its collection.
    pub id: String,
    /// All stored fields, unmodified.
    pub fields: Map<String, Value>,
}

impl Document {
    /// Create an empty document with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    /// Create a document from an existing field bag.
    pub fn from_fields(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Set a field, builder style.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Set a field in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Get a raw field value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Check whether a field is present.
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Get a field as a string slice.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Get a field as a non-empty string slice.
    pub fn text_field(&self, key: &str) -> Option<&str> {
        self.str_field(key).filter(|s| !s.trim().is_empty())
    }

    /// Get a field as a float (integers widen).
    pub fn f64_field(&self, key: &str) -> Option<f64> {
        self.fields.get(key).and_then(Value::as_f64)
    }

    /// Get a field as an integer.
    pub fn i64_field(&self, key: &str) -> Option<i64> {
        self.fields.get(key).and_then(Value::as_i64)
    }

    /// Get a field as an array.
    pub fn array_field(&self, key: &str) -> Option<&Vec<Value>> {
        self.fields.get(key).and_then(Value::as_array)
    }
}
