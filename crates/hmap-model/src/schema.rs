//! Canonical column definitions.

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Deserialize, Serialize};

/// A canonical column with its aliases and descriptive metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnSchema {
    pub canonical_name: String,
    pub description: String,
    pub data_type: String,
    pub required: bool,
    pub example_values: Vec<String>,
    pub aliases: Vec<String>,
}

impl ColumnSchema {
    pub fn new(canonical_name: impl Into<String>) -> Self {
        Self {
            canonical_name: canonical_name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }
}

/// Ordered, read-only mapping from schema key to column definition.
///
/// Iteration follows insertion order, which is the order entries appear in
/// the schema files. Matching relies on that order for tie-breaking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnSchemaStore {
    entries: IndexMap<String, ColumnSchema>,
}

impl ColumnSchemaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&ColumnSchema> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterate `(key, schema)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnSchema)> {
        self.entries
            .iter()
            .map(|(key, schema)| (key.as_str(), schema))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Insert or replace an entry. A replaced entry keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, schema: ColumnSchema) {
        self.entries.insert(key.into(), schema);
    }

    /// Insert only if `key` is not present yet. Returns whether it was added.
    pub fn insert_if_absent(&mut self, key: impl Into<String>, schema: ColumnSchema) -> bool {
        match self.entries.entry(key.into()) {
            Entry::Vacant(slot) => {
                slot.insert(schema);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Adds every entry of `other` whose key is not already present.
    ///
    /// Returns the number of entries added.
    pub fn merge_missing(&mut self, other: ColumnSchemaStore) -> usize {
        let mut added = 0;
        for (key, schema) in other.entries {
            if self.insert_if_absent(key, schema) {
                added += 1;
            }
        }
        added
    }
}

impl<K: Into<String>> FromIterator<(K, ColumnSchema)> for ColumnSchemaStore {
    fn from_iter<T: IntoIterator<Item = (K, ColumnSchema)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, schema)| (key.into(), schema))
                .collect(),
        }
    }
}
