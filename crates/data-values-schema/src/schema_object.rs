// crates/data-values-schema/src/schema_object.rs
// ============================================================================
// Module: Schema Objects
// Description: Ordered keyword/value entries for one JSON Schema object.
// Purpose: Collect keywords during conversion, then sort and freeze them.
// Dependencies: serde_json, crate::key_order
// ============================================================================

//! ## Overview
//! A [`SchemaObject`] is built by appending entries, then sorted with
//! [`compare_keywords`](crate::key_order::compare_keywords) before it leaves
//! the converter. Nested schemas are stored as already-frozen
//! [`Value::Object`]s; `serde_json` is built with `preserve_order`, so the
//! sorted order survives serialization.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;

use crate::key_order::compare_keywords;

// ============================================================================
// SECTION: Types
// ============================================================================

/// A single keyword contribution.
pub type SchemaEntry = (String, Value);

/// Ordered keyword entries for one schema object.
///
/// # Invariants
/// - Keys are unique; inserting an existing key replaces its value in place.
/// - Objects returned by the converter are sorted under the canonical order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SchemaObject {
    /// Entries in current order.
    entries: Vec<SchemaEntry>,
}

impl SchemaObject {
    /// Creates an empty schema object.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts a keyword; an existing keyword keeps its position and takes the new value.
    pub fn insert(&mut self, keyword: impl Into<String>, value: Value) {
        let keyword = keyword.into();
        if let Some(entry) = self.entries.iter_mut().find(|(key, _)| *key == keyword) {
            entry.1 = value;
        } else {
            self.entries.push((keyword, value));
        }
    }

    /// Inserts every entry in order.
    pub fn extend(&mut self, entries: impl IntoIterator<Item = SchemaEntry>) {
        for (keyword, value) in entries {
            self.insert(keyword, value);
        }
    }

    /// Returns the value for a keyword.
    #[must_use]
    pub fn get(&self, keyword: &str) -> Option<&Value> {
        self.entries.iter().find(|(key, _)| key == keyword).map(|(_, value)| value)
    }

    /// Returns the keywords in current order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Returns the number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when there are no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sorts entries under the canonical keyword order.
    #[must_use]
    pub fn sorted(mut self) -> Self {
        self.entries.sort_by(|(left, _), (right, _)| compare_keywords(left, right));
        self
    }

    /// Consumes the object into its entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<SchemaEntry> {
        self.entries
    }

    /// Freezes the object into a JSON value, keeping the current order.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.entries.into_iter().collect::<Map<String, Value>>())
    }
}

impl FromIterator<SchemaEntry> for SchemaObject {
    fn from_iter<I: IntoIterator<Item = SchemaEntry>>(iter: I) -> Self {
        let mut object = Self::new();
        object.extend(iter);
        object
    }
}
