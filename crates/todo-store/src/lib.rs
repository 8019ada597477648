//! Todo Store
//!
//! Session-scoped todo list core: the in-memory collection, its mirror in
//! key/value storage, and the transient notice raised when that mirror
//! cannot be written. Everything here is single-threaded and synchronous;
//! the browser bindings live in the frontend crate.

pub mod codec;
pub mod config;
pub mod list;
pub mod model;
pub mod notice;
pub mod persistence;
pub mod session;
pub mod storage;

#[cfg(test)]
pub(crate) mod testing;

pub use codec::{decode, encode, is_valid_todos, CodecError};
pub use config::{SessionConfig, NOTICE_TIMEOUT, QUOTA_MESSAGE, STORAGE_KEY};
pub use list::{TodoAction, TodoList};
pub use model::{Todo, TodoPatch};
pub use notice::{Notice, NotificationChannel, Scheduler};
pub use persistence::{SaveError, TodoPersistence};
pub use session::TodoSession;
pub use storage::{MemoryStorage, StorageBackend, StorageError};
