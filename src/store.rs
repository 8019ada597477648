//! Global Application State Store
//!
//! Reactive mirror of the todo session for rendering. The session stays
//! authoritative; this store is only ever written from its observers.

use leptos::prelude::*;
use reactive_stores::Store;
use todo_store::Todo;

/// What the view layer reads, with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// The collection, in insertion order
    pub todos: Vec<Todo>,
    /// Active storage notice
    pub storage_error: Option<String>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace the mirrored collection
pub fn store_replace_todos(store: &AppStore, todos: &[Todo]) {
    *store.todos().write() = todos.to_vec();
}

/// Mirror the storage notice
pub fn store_set_storage_error(store: &AppStore, message: Option<&str>) {
    *store.storage_error().write() = message.map(str::to_string);
}
