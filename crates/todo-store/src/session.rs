//! Todo Session
//!
//! Wires the list store to persistence as an observer: every change to the
//! collection is followed by one save attempt, and its outcome drives the
//! storage notice.

use std::cell::Cell;
use std::rc::Rc;

use crate::config::SessionConfig;
use crate::list::TodoList;
use crate::model::{Todo, TodoPatch};
use crate::notice::{NotificationChannel, Scheduler};
use crate::persistence::{SaveError, TodoPersistence};
use crate::storage::StorageBackend;

/// The collaborator-facing core: collection, persistence and storage notice
pub struct TodoSession<B, S: Scheduler> {
    list: TodoList,
    persistence: Rc<TodoPersistence<B>>,
    notices: Rc<NotificationChannel<S>>,
    save_attempts: Rc<Cell<usize>>,
}

impl<B, S> TodoSession<B, S>
where
    B: StorageBackend + 'static,
    S: Scheduler + 'static,
{
    pub fn new(backend: B, scheduler: S) -> Self {
        Self::with_config(backend, scheduler, SessionConfig::default())
    }

    /// Hydrate from storage once, then start mirroring changes back
    pub fn with_config(backend: B, scheduler: S, config: SessionConfig) -> Self {
        let persistence = Rc::new(TodoPersistence::with_key(backend, config.storage_key));
        let mut list = TodoList::new(persistence.load());
        let notices = Rc::new(NotificationChannel::new(scheduler, config.notice_timeout));
        let save_attempts = Rc::new(Cell::new(0));

        list.subscribe(persist_changes(
            persistence.clone(),
            notices.clone(),
            save_attempts.clone(),
            config.quota_message,
        ));

        Self {
            list,
            persistence,
            notices,
            save_attempts,
        }
    }
}

impl<B, S: Scheduler> TodoSession<B, S> {
    pub fn todos(&self) -> &[Todo] {
        self.list.todos()
    }

    pub fn list(&self) -> &TodoList {
        &self.list
    }

    pub fn persistence(&self) -> &TodoPersistence<B> {
        &self.persistence
    }

    pub fn add_todo(&mut self, title: impl Into<String>, description: impl Into<String>) -> String {
        self.list.add(title, description)
    }

    pub fn edit_todo(&mut self, id: &str, patch: TodoPatch) {
        self.list.edit(id, patch);
    }

    pub fn toggle_todo(&mut self, id: &str) {
        self.list.toggle(id);
    }

    pub fn delete_todo(&mut self, id: &str) {
        self.list.delete(id);
    }

    /// Current storage notice text, if any
    pub fn storage_error(&self) -> Option<String> {
        self.notices.message()
    }

    /// Dismiss the storage notice before it expires
    pub fn dismiss_storage_error(&self) {
        self.notices.clear();
    }

    /// Observe the collection after every change
    pub fn subscribe(&mut self, observer: impl FnMut(&[Todo]) + 'static) {
        self.list.subscribe(observer);
    }

    /// Observe the storage notice, including expiry
    pub fn on_storage_error(&self, listener: impl Fn(Option<&str>) + 'static) {
        self.notices.on_change(listener);
    }

    /// Number of persistence attempts made since hydration
    pub fn save_attempts(&self) -> usize {
        self.save_attempts.get()
    }
}

fn persist_changes<B, S>(
    persistence: Rc<TodoPersistence<B>>,
    notices: Rc<NotificationChannel<S>>,
    attempts: Rc<Cell<usize>>,
    quota_message: String,
) -> impl FnMut(&[Todo])
where
    B: StorageBackend,
    S: Scheduler,
{
    move |todos: &[Todo]| {
        attempts.set(attempts.get() + 1);
        match persistence.save(todos) {
            Ok(()) => notices.clear(),
            Err(SaveError::QuotaExceeded) => notices.raise(quota_message.as_str()),
            // Logged by the adapter; the notice is left as it was
            Err(SaveError::Write(_)) => {}
        }
    }
}
