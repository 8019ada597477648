//! New Todo Form Component
//!
//! Title and optional description for a new todo.

use leptos::prelude::*;

use crate::context::use_todo_context;

/// Form for appending a todo to the list
#[component]
pub fn NewTodoForm() -> impl IntoView {
    let ctx = use_todo_context();

    let (title, set_title) = signal(String::new());
    let (description, set_description) = signal(String::new());

    let create_todo = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = title.get();
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        ctx.add_todo(text.to_string(), description.get());
        set_title.set(String::new());
        set_description.set(String::new());
    };

    view! {
        <form class="new-item-form" on:submit=create_todo>
            <div class="new-item-row">
                <input
                    type="text"
                    placeholder="What needs doing?"
                    prop:value=move || title.get()
                    on:input=move |ev| set_title.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || title.get().trim().is_empty()>
                    "Add"
                </button>
            </div>
            <textarea
                class="description-input"
                placeholder="Description (optional)"
                prop:value=move || description.get()
                on:input=move |ev| set_description.set(event_target_value(&ev))
            ></textarea>
        </form>
    }
}
