//! Storage Backend
//!
//! The key/value text store the collection is mirrored into. Shaped after
//! the Web Storage API so the browser's `sessionStorage` slots in directly.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

/// Failures reported by a storage backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The write would exceed the storage capacity; nothing was written
    #[error("storage quota exceeded")]
    QuotaExceeded,
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage error: {0}")]
    Other(String),
}

impl StorageError {
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, StorageError::QuotaExceeded)
    }
}

/// Synchronous text storage keyed by string
pub trait StorageBackend {
    /// Read the value under `key`, `None` when absent
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`; removing an absent key succeeds
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<B: StorageBackend + ?Sized> StorageBackend for Rc<B> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

/// In-memory backend; clones share the same entries
///
/// An optional quota is counted in UTF-16 code units over keys and values,
/// which is how browsers account for Web Storage usage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that refuses writes which would grow past `quota` units
    pub fn with_quota(quota: usize) -> Self {
        let storage = Self::default();
        storage.inner.borrow_mut().quota = Some(quota);
        storage
    }

    /// Current usage in UTF-16 code units
    pub fn used(&self) -> usize {
        let inner = self.inner.borrow();
        inner.entries.iter().map(|(k, v)| entry_size(k, v)).sum()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.borrow().entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn entry_size(key: &str, value: &str) -> usize {
    key.encode_utf16().count() + value.encode_utf16().count()
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.inner.borrow().entries.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let used = self.used();
        let mut inner = self.inner.borrow_mut();
        if let Some(quota) = inner.quota {
            let replaced = inner.entries.get(key).map_or(0, |old| entry_size(key, old));
            if used - replaced + entry_size(key, value) > quota {
                return Err(StorageError::QuotaExceeded);
            }
        }
        inner.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.inner.borrow_mut().entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("todos").unwrap(), None);

        storage.set_item("todos", "[]").unwrap();
        assert_eq!(storage.get_item("todos").unwrap().as_deref(), Some("[]"));

        storage.remove_item("todos").unwrap();
        assert!(!storage.contains_key("todos"));
        storage.remove_item("todos").unwrap();
    }

    #[test]
    fn test_clones_share_entries() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();
        storage.set_item("k", "v").unwrap();
        assert_eq!(handle.get_item("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_quota_counts_utf16_units() {
        // "k" + "–" is two units even though "–" is three UTF-8 bytes
        let storage = MemoryStorage::with_quota(2);
        storage.set_item("k", "–").unwrap();
        assert_eq!(storage.used(), 2);
    }

    #[test]
    fn test_quota_exceeded_keeps_previous_value() {
        let storage = MemoryStorage::with_quota(6);
        storage.set_item("k", "short").unwrap();

        let err = storage.set_item("k", "much too long").unwrap_err();
        assert!(err.is_quota_exceeded());
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("short"));
    }

    #[test]
    fn test_replacing_value_frees_old_size() {
        let storage = MemoryStorage::with_quota(6);
        storage.set_item("k", "abcde").unwrap();
        storage.set_item("k", "vwxyz").unwrap();
        assert_eq!(storage.used(), 6);
    }
}
