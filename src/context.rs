//! Application Context
//!
//! The collaborator-facing todo operations, provided via Leptos Context API.

use leptos::prelude::*;
use todo_store::{TodoPatch, TodoSession};

use crate::browser::{SessionBackend, TimeoutScheduler};

pub type BrowserSession = TodoSession<SessionBackend, TimeoutScheduler>;

/// Handle to the session; cheap to copy into event handlers
#[derive(Clone, Copy)]
pub struct TodoContext {
    session: StoredValue<BrowserSession, LocalStorage>,
}

impl TodoContext {
    pub fn new(session: BrowserSession) -> Self {
        Self {
            session: StoredValue::new_local(session),
        }
    }

    pub fn add_todo(&self, title: String, description: String) {
        self.session.update_value(|session| {
            let id = session.add_todo(title, description);
            log::debug!("[TODO] Added {}", id);
        });
    }

    pub fn edit_todo(&self, id: &str, patch: TodoPatch) {
        self.session.update_value(|session| session.edit_todo(id, patch));
    }

    pub fn toggle_todo(&self, id: &str) {
        self.session.update_value(|session| session.toggle_todo(id));
    }

    pub fn delete_todo(&self, id: &str) {
        self.session.update_value(|session| session.delete_todo(id));
    }

    pub fn dismiss_storage_error(&self) {
        self.session.with_value(|session| session.dismiss_storage_error());
    }
}

/// Get the todo context
pub fn use_todo_context() -> TodoContext {
    expect_context::<TodoContext>()
}
