//! List State Store
//!
//! Owns the authoritative collection. Every change goes through a
//! [`TodoAction`], a pure transition from the old collection to the new one;
//! observers hear about each dispatched action exactly once, afterwards.

use crate::model::{Todo, TodoPatch};

/// A single mutation of the collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoAction {
    /// Append a new todo at the end
    Add(Todo),
    /// Replace the supplied fields of the matching todo
    Edit { id: String, patch: TodoPatch },
    /// Flip completion of the matching todo
    Toggle { id: String },
    /// Remove the matching todo
    Delete { id: String },
}

impl TodoAction {
    /// Produce the next collection; unknown ids leave it unchanged
    pub fn apply(self, mut todos: Vec<Todo>) -> Vec<Todo> {
        match self {
            TodoAction::Add(todo) => {
                if !todos.iter().any(|t| t.id == todo.id) {
                    todos.push(todo);
                }
            }
            TodoAction::Edit { id, patch } => {
                if let Some(todo) = todos.iter_mut().find(|t| t.id == id) {
                    patch.apply_to(todo);
                }
            }
            TodoAction::Toggle { id } => {
                if let Some(todo) = todos.iter_mut().find(|t| t.id == id) {
                    todo.completed = !todo.completed;
                }
            }
            TodoAction::Delete { id } => todos.retain(|t| t.id != id),
        }
        todos
    }
}

type Observer = Box<dyn FnMut(&[Todo])>;

/// The in-memory collection plus its change observers
#[derive(Default)]
pub struct TodoList {
    todos: Vec<Todo>,
    observers: Vec<Observer>,
}

impl TodoList {
    /// Start from an already hydrated collection
    pub fn new(todos: Vec<Todo>) -> Self {
        Self {
            todos,
            observers: Vec::new(),
        }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn get(&self, id: &str) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Register an observer called with the new collection after every dispatch
    pub fn subscribe(&mut self, observer: impl FnMut(&[Todo]) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Apply an action and notify observers
    pub fn dispatch(&mut self, action: TodoAction) {
        let todos = std::mem::take(&mut self.todos);
        self.todos = action.apply(todos);
        for observer in self.observers.iter_mut() {
            observer(&self.todos);
        }
    }

    /// Append a new todo and return its id
    pub fn add(&mut self, title: impl Into<String>, description: impl Into<String>) -> String {
        let todo = Todo::new(title, description);
        let id = todo.id.clone();
        self.dispatch(TodoAction::Add(todo));
        id
    }

    pub fn edit(&mut self, id: &str, patch: TodoPatch) {
        self.dispatch(TodoAction::Edit {
            id: id.to_string(),
            patch,
        });
    }

    pub fn toggle(&mut self, id: &str) {
        self.dispatch(TodoAction::Toggle { id: id.to_string() });
    }

    pub fn delete(&mut self, id: &str) {
        self.dispatch(TodoAction::Delete { id: id.to_string() });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_add_appends_in_order() {
        let mut list = TodoList::default();
        let first = list.add("First", "");
        let second = list.add("Second", "details");

        let ids: Vec<&str> = list.todos().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec![first.as_str(), second.as_str()]);
        assert_eq!(list.get(&second).unwrap().description, "details");
        assert!(!list.get(&first).unwrap().completed);
    }

    #[test]
    fn test_toggle_flips_in_place() {
        let mut list = TodoList::default();
        let id = list.add("Task", "");

        list.toggle(&id);
        assert!(list.get(&id).unwrap().completed);

        list.toggle(&id);
        assert!(!list.get(&id).unwrap().completed);
    }

    #[test]
    fn test_edit_keeps_unsupplied_fields() {
        let mut list = TodoList::default();
        let id = list.add("Task", "notes");
        let created_at = list.get(&id).unwrap().created_at;

        list.edit(&id, TodoPatch::new().title("Renamed").completed(true));

        let todo = list.get(&id).unwrap();
        assert_eq!(todo.title, "Renamed");
        assert_eq!(todo.description, "notes");
        assert!(todo.completed);
        assert_eq!(todo.created_at, created_at);
    }

    #[test]
    fn test_delete_removes_only_match() {
        let mut list = TodoList::default();
        let keep = list.add("Keep", "");
        let drop = list.add("Drop", "");

        list.delete(&drop);
        assert_eq!(list.len(), 1);
        assert!(list.get(&keep).is_some());
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let mut list = TodoList::default();
        list.add("Only", "");
        let before = list.todos().to_vec();

        list.toggle("missing");
        list.edit("missing", TodoPatch::new().title("x"));
        list.delete("missing");

        assert_eq!(list.todos(), before.as_slice());
    }

    #[test]
    fn test_duplicate_add_is_ignored() {
        let todo = Todo::new("Once", "");
        let todos = TodoAction::Add(todo.clone()).apply(vec![todo]);
        assert_eq!(todos.len(), 1);
    }

    #[test]
    fn test_observers_see_new_collection_once_per_dispatch() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut list = TodoList::default();
        let sink = seen.clone();
        list.subscribe(move |todos| sink.borrow_mut().push(todos.len()));

        let id = list.add("Task", "");
        list.toggle(&id);
        list.toggle("missing");
        list.delete(&id);

        assert_eq!(*seen.borrow(), vec![1, 1, 1, 0]);
    }
}
