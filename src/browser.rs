//! Browser Bindings
//!
//! `sessionStorage` as a [`StorageBackend`] and browser timeouts as a
//! [`Scheduler`] for the todo core.

use std::time::Duration;

use gloo_timers::callback::Timeout;
use todo_store::{MemoryStorage, Scheduler, StorageBackend, StorageError};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{DomException, Storage};

/// Legacy DOMException code for quota exhaustion
const QUOTA_EXCEEDED_CODE: u16 = 22;

/// The tab's `sessionStorage`
pub struct BrowserStorage {
    storage: Storage,
}

impl BrowserStorage {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }
}

impl StorageBackend for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(key).map_err(classify_error)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage.set_item(key, value).map_err(classify_error)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.storage.remove_item(key).map_err(classify_error)
    }
}

/// Map a thrown JS value onto the core's storage error kinds
pub fn classify_error(err: JsValue) -> StorageError {
    if let Some(dom) = err.dyn_ref::<DomException>() {
        let name = dom.name();
        if name == "QuotaExceededError"
            || name == "NS_ERROR_DOM_QUOTA_REACHED"
            || dom.code() == QUOTA_EXCEEDED_CODE
        {
            return StorageError::QuotaExceeded;
        }
        return StorageError::Other(format!("{}: {}", name, dom.message()));
    }
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return StorageError::Other(String::from(error.message()));
    }
    StorageError::Other(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

/// Where the session mirror lives
pub enum SessionBackend {
    Browser(BrowserStorage),
    /// `sessionStorage` was blocked; state lasts only as long as the page
    Memory(MemoryStorage),
}

impl StorageBackend for SessionBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            SessionBackend::Browser(storage) => storage.get_item(key),
            SessionBackend::Memory(storage) => storage.get_item(key),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            SessionBackend::Browser(storage) => storage.set_item(key, value),
            SessionBackend::Memory(storage) => storage.set_item(key, value),
        }
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        match self {
            SessionBackend::Browser(storage) => storage.remove_item(key),
            SessionBackend::Memory(storage) => storage.remove_item(key),
        }
    }
}

/// Open the tab's `sessionStorage`, falling back to memory when it is unavailable
pub fn open_session_storage() -> SessionBackend {
    let Some(window) = web_sys::window() else {
        log::warn!("No window available, keeping todos in memory only");
        return SessionBackend::Memory(MemoryStorage::new());
    };
    match window.session_storage() {
        Ok(Some(storage)) => SessionBackend::Browser(BrowserStorage::new(storage)),
        Ok(None) => {
            log::warn!("sessionStorage is not available, keeping todos in memory only");
            SessionBackend::Memory(MemoryStorage::new())
        }
        Err(err) => {
            log::warn!(
                "sessionStorage is blocked ({}), keeping todos in memory only",
                classify_error(err)
            );
            SessionBackend::Memory(MemoryStorage::new())
        }
    }
}

/// Schedules tasks with `setTimeout`; dropping the handle clears the timeout
#[derive(Clone, Copy, Debug, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(timeout_millis(delay), task)
    }
}

/// `setTimeout` treats delays above `i32::MAX` ms as zero, so clamp to it
fn timeout_millis(delay: Duration) -> u32 {
    let max = i32::MAX.unsigned_abs();
    u32::try_from(delay.as_millis()).map_or(max, |millis| millis.min(max))
}
