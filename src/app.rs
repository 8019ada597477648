//! Session Todos App
//!
//! Hydrates the session from `sessionStorage` and lays out the list.

use leptos::prelude::*;
use reactive_stores::Store;
use todo_store::TodoSession;

use crate::browser::{open_session_storage, TimeoutScheduler};
use crate::components::{NewTodoForm, StorageToast, TodoListView};
use crate::context::TodoContext;
use crate::store::{store_replace_todos, store_set_storage_error, AppState, AppStateStoreFields};

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState::default());

    // Hydrate once, then keep the reactive mirror in step with the session
    let mut session = TodoSession::new(open_session_storage(), TimeoutScheduler);
    store_replace_todos(&store, session.todos());
    session.subscribe(move |todos| store_replace_todos(&store, todos));
    session.on_storage_error(move |message| store_set_storage_error(&store, message));

    provide_context(store);
    provide_context(TodoContext::new(session));

    let summary = move || {
        let todos = store.todos().read();
        let done = todos.iter().filter(|t| t.completed).count();
        format!("{} of {} done", done, todos.len())
    };

    view! {
        <div class="app-layout">
            <main class="main-content">
                <header class="app-header">
                    <h1>"Your Todos"</h1>
                    <p class="item-count">{summary}</p>
                </header>

                <NewTodoForm />

                <TodoListView />
            </main>

            <StorageToast />
        </div>
    }
}
