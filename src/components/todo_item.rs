//! Todo Item Component
//!
//! One row: completion checkbox, text, inline editor and delete.

use chrono::Local;
use leptos::prelude::*;
use todo_store::{Todo, TodoPatch};

use crate::components::DeleteConfirmButton;
use crate::context::use_todo_context;

/// A single todo row
#[component]
pub fn TodoItem(todo: Todo) -> impl IntoView {
    let ctx = use_todo_context();

    let created = todo
        .created_at
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string();
    let completed = todo.completed;

    let (editing, set_editing) = signal(false);
    let (draft_title, set_draft_title) = signal(todo.title.clone());
    let (draft_description, set_draft_description) = signal(todo.description.clone());

    // Copyable handles so every closure below stays `Copy`
    let id = StoredValue::new(todo.id);
    let original = StoredValue::new((todo.title, todo.description));

    let cancel_edit = move || {
        let (title, description) = original.get_value();
        set_draft_title.set(title);
        set_draft_description.set(description);
        set_editing.set(false);
    };

    let save_edit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let title = draft_title.get();
        let title = title.trim();
        if title.is_empty() {
            return;
        }
        let patch = TodoPatch::new()
            .title(title)
            .description(draft_description.get());
        id.with_value(|id| ctx.edit_todo(id, patch));
        set_editing.set(false);
    };

    let on_escape = move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" {
            cancel_edit();
        }
    };

    view! {
        <li class=move || if completed { "item-row completed" } else { "item-row" }>
            {move || if editing.get() {
                view! {
                    <form class="todo-edit" on:submit=save_edit>
                        <input
                            type="text"
                            prop:value=move || draft_title.get()
                            on:input=move |ev| set_draft_title.set(event_target_value(&ev))
                            on:keydown=on_escape
                        />
                        <textarea
                            prop:value=move || draft_description.get()
                            on:input=move |ev| set_draft_description.set(event_target_value(&ev))
                            on:keydown=on_escape
                        ></textarea>
                        <button type="submit">"Save"</button>
                        <button type="button" class="cancel-btn" on:click=move |_| cancel_edit()>
                            "Cancel"
                        </button>
                    </form>
                }.into_any()
            } else {
                let (title, description) = original.get_value();
                view! {
                    <input
                        type="checkbox"
                        checked=completed
                        on:change=move |_| id.with_value(|id| ctx.toggle_todo(id))
                    />
                    <div class="item-body" on:dblclick=move |_| set_editing.set(true)>
                        <span class="item-text">{title}</span>
                        {(!description.is_empty()).then(|| view! {
                            <p class="item-description">{description}</p>
                        })}
                        <span class="item-created">{created.clone()}</span>
                    </div>
                    <button class="edit-btn" on:click=move |_| set_editing.set(true)>"Edit"</button>
                    <DeleteConfirmButton
                        button_class="delete-btn"
                        on_confirm=Callback::new(move |_| id.with_value(|id| ctx.delete_todo(id)))
                    />
                }.into_any()
            }}
        </li>
    }
}
