//! @acp:module "Memory Storage"
//! @acp:summary "In-process storage area with quota and availability fault injection"
//! @acp:domain storage
//! @acp:layer service

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use super::Storage;
use crate::error::StorageError;

/// @acp:summary "In-memory storage area"
///
/// Byte accounting counts key and value lengths, matching how browsers
/// charge storage quota.
#[derive(Debug)]
pub struct MemoryStorage {
    items: RefCell<BTreeMap<String, String>>,
    quota: Option<usize>,
    available: Cell<bool>,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            items: RefCell::new(BTreeMap::new()),
            quota: None,
            available: Cell::new(true),
        }
    }

    /// Area whose total size may not exceed `bytes`
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Self::new()
        }
    }

    /// Area where every access fails, like storage disabled in private mode
    pub fn unavailable() -> Self {
        let storage = Self::new();
        storage.available.set(false);
        storage
    }

    /// Pre-populated area
    pub fn with_items<I, K, V>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let storage = Self::new();
        storage
            .items
            .borrow_mut()
            .extend(items.into_iter().map(|(k, v)| (k.into(), v.into())));
        storage
    }

    pub fn set_available(&self, available: bool) {
        self.available.set(available);
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Total bytes currently charged against the quota
    pub fn used_bytes(&self) -> usize {
        self.items
            .borrow()
            .iter()
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.available.get() {
            Ok(())
        } else {
            Err(StorageError::Unavailable("memory storage disabled".into()))
        }
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_available()?;
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_available()?;

        if let Some(limit) = self.quota {
            let existing = self
                .items
                .borrow()
                .get(key)
                .map(|v| key.len() + v.len())
                .unwrap_or(0);
            let needed = self.used_bytes() - existing + key.len() + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    limit,
                });
            }
        }

        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.check_available()?;
        self.items.borrow_mut().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.check_available()?;
        self.items.borrow_mut().clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("a").unwrap(), None);

        storage.set_item("a", "1").unwrap();
        storage.set_item("a", "2").unwrap();
        assert_eq!(storage.get_item("a").unwrap(), Some("2".to_string()));
        assert_eq!(storage.len(), 1);

        storage.remove_item("a").unwrap();
        storage.remove_item("a").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_quota_rejects_oversized_write() {
        let storage = MemoryStorage::with_quota(10);
        storage.set_item("cart", "[]").unwrap();
        assert_eq!(storage.used_bytes(), 6);

        let err = storage.set_item("cart", "[\"sku-1\"]").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { limit: 10, .. }));
        assert_eq!(storage.get_item("cart").unwrap(), Some("[]".to_string()));
    }

    #[test]
    fn test_quota_counts_replacement_not_sum() {
        let storage = MemoryStorage::with_quota(8);
        storage.set_item("k", "1234567").unwrap();
        storage.set_item("k", "7654321").unwrap();
        assert_eq!(storage.used_bytes(), 8);
    }

    #[test]
    fn test_unavailable_fails_every_call() {
        let storage = MemoryStorage::unavailable();
        assert!(matches!(
            storage.get_item("a"),
            Err(StorageError::Unavailable(_))
        ));
        assert!(storage.set_item("a", "1").is_err());
        assert!(storage.remove_item("a").is_err());
        assert!(storage.clear().is_err());

        storage.set_available(true);
        assert!(storage.set_item("a", "1").is_ok());
    }

    #[test]
    fn test_with_items() {
        let storage = MemoryStorage::with_items([("wishlist", "[\"a\"]")]);
        assert_eq!(
            storage.get_item("wishlist").unwrap(),
            Some("[\"a\"]".to_string())
        );
    }
}
