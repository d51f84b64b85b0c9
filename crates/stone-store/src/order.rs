//! Recency ordering configuration.
//!
//! Deployments disagree on which field carries a product's creation moment:
//! the admin write path stamps `created_at`, while older imports carry
//! `timestamp`. Which one drives the storefront's newest-first ordering is a
//! deployment choice, so it is configuration here rather than a constant.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::Document;

/// The document field used for recency ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderField {
    /// Order by the `created_at` field (what the admin path writes).
    #[default]
    CreatedAt,
    /// Order by the `timestamp` field (legacy imports).
    Timestamp,
}

impl OrderField {
    /// The document field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Timestamp => "timestamp",
        }
    }

    /// Parse a field name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "created_at" => Some(Self::CreatedAt),
            "timestamp" => Some(Self::Timestamp),
            _ => None,
        }
    }
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Ascending,
    /// Newest first. The storefront default.
    #[default]
    Descending,
}

/// A complete ordering: field plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OrderBy {
    pub field: OrderField,
    pub direction: Direction,
}

impl OrderBy {
    /// Create an ordering.
    pub fn new(field: OrderField, direction: Direction) -> Self {
        Self { field, direction }
    }

    /// Newest-first ordering on the given field.
    pub fn newest_first(field: OrderField) -> Self {
        Self {
            field,
            direction: Direction::Descending,
        }
    }

    /// True when this ordering is descending.
    pub fn is_descending(&self) -> bool {
        self.direction == Direction::Descending
    }
}

/// Sort documents in place by an ordering.
///
/// Numeric and string order fields both work; documents missing the field
/// sort after all documents that carry it, regardless of direction. The
/// sort is stable, so ties keep their incoming order.
pub fn sort_documents(docs: &mut [Document], order: &OrderBy) {
    let field = order.field.as_str();
    docs.sort_by(|a, b| match (sort_key(a, field), sort_key(b, field)) {
        (Some(x), Some(y)) => {
            let cmp = compare_keys(&x, &y);
            if order.is_descending() {
                cmp.reverse()
            } else {
                cmp
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

enum SortKey {
    Number(f64),
    Text(String),
}

fn sort_key(doc: &Document, field: &str) -> Option<SortKey> {
    match doc.get(field)? {
        Value::Number(n) => n.as_f64().map(SortKey::Number),
        Value::String(s) => Some(SortKey::Text(s.clone())),
        _ => None,
    }
}

fn compare_keys(a: &SortKey, b: &SortKey) -> Ordering {
    match (a, b) {
        (SortKey::Number(x), SortKey::Number(y)) => x.total_cmp(y),
        (SortKey::Text(x), SortKey::Text(y)) => x.cmp(y),
        (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
        (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_field_round_trip() {
        assert_eq!(OrderField::CreatedAt.as_str(), "created_at");
        assert_eq!(OrderField::parse("timestamp"), Some(OrderField::Timestamp));
        assert_eq!(OrderField::parse("updated_at"), None);
    }

    #[test]
    fn test_default_is_created_at_descending() {
        let order = OrderBy::default();
        assert_eq!(order.field, OrderField::CreatedAt);
        assert!(order.is_descending());
    }

    #[test]
    fn test_newest_first() {
        let order = OrderBy::newest_first(OrderField::Timestamp);
        assert_eq!(order.field.as_str(), "timestamp");
        assert!(order.is_descending());
    }

    #[test]
    fn test_sort_documents_with_string_keys() {
        let mut docs = vec![
            Document::new("a").with_field("created_at", "2024-01-02T00:00:00Z"),
            Document::new("b").with_field("created_at", "2024-03-01T00:00:00Z"),
            Document::new("c"),
            Document::new("d").with_field("created_at", "2024-02-01T00:00:00Z"),
        ];

        sort_documents(&mut docs, &OrderBy::newest_first(OrderField::CreatedAt));
        let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d", "a", "c"]);
    }
}
