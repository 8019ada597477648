//! Todo List View Component

use leptos::prelude::*;

use crate::components::TodoItem;
use crate::store::{use_app_store, AppStateStoreFields};

/// All todos in insertion order
#[component]
pub fn TodoListView() -> impl IntoView {
    let store = use_app_store();

    view! {
        <Show
            when=move || !store.todos().read().is_empty()
            fallback=|| view! { <p class="empty-list">"Nothing to do yet."</p> }
        >
            <ul class="todo-list">
                <For
                    each=move || store.todos().get()
                    // Every editable field is part of the key so edits re-render the row
                    key=|todo| {
                        (
                            todo.id.clone(),
                            todo.title.clone(),
                            todo.description.clone(),
                            todo.completed,
                        )
                    }
                    children=move |todo| view! { <TodoItem todo=todo /> }
                />
            </ul>
        </Show>
    }
}
