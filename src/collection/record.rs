//! @acp:module "Collection Record"
//! @acp:summary "Named, ordered set of opaque identifiers and its JSON form"
//! @acp:domain storage
//! @acp:layer model

use std::fmt;
use std::str::FromStr;

use crate::error::{GateError, StorageError};

/// @acp:summary "The collections pages keep by convention"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Wishlist,
    Cart,
}

impl CollectionKind {
    /// Local-storage key the collection lives under
    pub fn key(&self) -> &'static str {
        match self {
            CollectionKind::Wishlist => "wishlist",
            CollectionKind::Cart => "cart",
        }
    }
}

impl FromStr for CollectionKind {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wishlist" => Ok(CollectionKind::Wishlist),
            "cart" => Ok(CollectionKind::Cart),
            _ => Err(GateError::UnknownCollection(s.to_string())),
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// @acp:summary "Ordered set of identifiers, unique by value"
///
/// Membership ignores order; display order is insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionRecord {
    name: String,
    ids: Vec<String>,
}

impl CollectionRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ids: Vec::new(),
        }
    }

    /// Build from a list that may hold duplicates; the first occurrence wins
    pub fn from_ids<I, S>(name: impl Into<String>, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut record = Self::new(name);
        for id in ids {
            record.insert(id.into());
        }
        record
    }

    /// @acp:summary "Decode the persisted JSON array of identifiers"
    pub fn from_json(name: impl Into<String>, raw: &str) -> Result<Self, StorageError> {
        let name = name.into();
        let ids: Vec<String> = serde_json::from_str(raw)
            .map_err(|e| StorageError::Corrupt(format!("{}: {}", name, e)))?;
        Ok(Self::from_ids(name, ids))
    }

    pub fn to_json(&self) -> String {
        // A Vec<String> always serializes
        serde_json::to_string(&self.ids).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    /// Append `id` if absent. Returns whether it was added.
    pub fn insert(&mut self, id: String) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Returns whether `id` was present
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| existing != id);
        self.ids.len() != before
    }

    /// Returns whether anything was removed
    pub fn clear(&mut self) -> bool {
        let had_items = !self.ids.is_empty();
        self.ids.clear();
        had_items
    }
}
