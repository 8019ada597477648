//! Persistence Adapter
//!
//! Mirrors the collection into a storage backend under a fixed key.
//! Neither direction lets a failure escape: `load` falls back to an empty
//! collection and `save` hands back a classified error value.

use thiserror::Error;

use crate::codec::{self, CodecError};
use crate::config::{QUOTA_MESSAGE, STORAGE_KEY};
use crate::model::Todo;
use crate::storage::{StorageBackend, StorageError};

/// Why a save did not reach storage
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    /// Capacity exhausted; the previously stored value is untouched
    #[error("storage quota exceeded")]
    QuotaExceeded,
    #[error("failed to write todos: {0}")]
    Write(StorageError),
}

impl SaveError {
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, SaveError::QuotaExceeded)
    }
}

impl From<StorageError> for SaveError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::QuotaExceeded => SaveError::QuotaExceeded,
            other => SaveError::Write(other),
        }
    }
}

pub struct TodoPersistence<B> {
    backend: B,
    key: String,
}

impl<B: StorageBackend> TodoPersistence<B> {
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, STORAGE_KEY)
    }

    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Read the stored collection
    ///
    /// Missing data yields an empty collection. Corrupt data is purged and
    /// also yields an empty collection; it is never partially trusted.
    pub fn load(&self) -> Vec<Todo> {
        let raw = match self.backend.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                log::warn!("Failed to read todos from storage, starting empty: {}", err);
                return Vec::new();
            }
        };

        match codec::decode(&raw) {
            Ok(todos) => {
                log::debug!("Hydrated {} todos from storage", todos.len());
                todos
            }
            Err(err) => {
                match &err {
                    CodecError::Malformed(_) => log::warn!(
                        "Failed to parse todos from storage, clearing and falling back to empty: {}",
                        err
                    ),
                    _ => log::warn!(
                        "Invalid todos data found in storage, clearing and falling back to empty: {}",
                        err
                    ),
                }
                self.purge();
                Vec::new()
            }
        }
    }

    /// Write the collection; `Ok` is the success flag
    pub fn save(&self, todos: &[Todo]) -> Result<(), SaveError> {
        codec::encode(todos)
            .map_err(|err| SaveError::Write(StorageError::Other(err.to_string())))
            .and_then(|encoded| {
                self.backend
                    .set_item(&self.key, &encoded)
                    .map_err(SaveError::from)
            })
            .inspect_err(|err| match err {
                SaveError::QuotaExceeded => log::warn!("{}", QUOTA_MESSAGE),
                SaveError::Write(cause) => {
                    log::error!("Failed to save todos to storage: {}", cause)
                }
            })
    }

    /// `save` reduced to a plain success flag
    pub fn save_ok(&self, todos: &[Todo]) -> bool {
        self.save(todos).is_ok()
    }

    fn purge(&self) {
        if let Err(err) = self.backend.remove_item(&self.key) {
            log::error!("Failed to remove corrupt todos entry: {}", err);
        }
    }
}
