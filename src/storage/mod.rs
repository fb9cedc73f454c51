//! @acp:module "Storage Port"
//! @acp:summary "Key/value storage abstraction over session and durable local storage"
//! @acp:domain storage
//! @acp:layer service
//!
//! # Storage Port
//!
//! The gate and the collection stores never touch a concrete storage area.
//! They talk to a [`Storage`] implementation handed to them at construction:
//!
//! - [`MemoryStorage`]: in-process area, with quota and availability switches
//!   for exercising the degraded paths
//! - [`FileStorage`]: one JSON file per area, re-read on every access so a
//!   second process sees the last writer
//!
//! Methods take `&self`. Several stores share one area (wishlist and cart
//! both live in local storage), so implementations use interior mutability
//! and the trait is implemented for `&T` and `Rc<T>`.

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use std::fmt;
use std::rc::Rc;

use crate::error::StorageError;

/// @acp:summary "Which storage area a backend stands for"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageScope {
    /// Cleared when the browsing session ends; one per tab
    Session,
    /// Persists until explicitly cleared; shared across tabs
    Local,
}

impl StorageScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageScope::Session => "session",
            StorageScope::Local => "local",
        }
    }
}

impl fmt::Display for StorageScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @acp:summary "Storage port - implement for each storage backend"
pub trait Storage {
    /// Read a value; `Ok(None)` when the key is absent
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a key. Absent keys are not an error.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;

    /// Delete every key in the area
    fn clear(&self) -> Result<(), StorageError>;
}

impl<T: Storage + ?Sized> Storage for &T {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }

    fn clear(&self) -> Result<(), StorageError> {
        (**self).clear()
    }
}

impl<T: Storage + ?Sized> Storage for Rc<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }

    fn clear(&self) -> Result<(), StorageError> {
        (**self).clear()
    }
}
