//! UI Components
//!
//! Reusable Leptos components.

mod delete_confirm_button;
mod new_todo_form;
mod toast;
mod todo_item;
mod todo_list_view;

pub use delete_confirm_button::DeleteConfirmButton;
pub use new_todo_form::NewTodoForm;
pub use toast::StorageToast;
pub use todo_item::TodoItem;
pub use todo_list_view::TodoListView;
