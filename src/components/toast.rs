//! Toast Component
//!
//! Transient notification banner, and the storage-notice instance of it.

use leptos::prelude::*;

use crate::context::use_todo_context;
use crate::store::{use_app_store, AppStateStoreFields};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastKind {
    #[default]
    Info,
    Warning,
}

impl ToastKind {
    fn as_str(self) -> &'static str {
        match self {
            ToastKind::Info => "info",
            ToastKind::Warning => "warning",
        }
    }
}

#[component]
pub fn Toast(
    #[prop(into)] message: String,
    #[prop(optional)] kind: ToastKind,
    #[prop(optional, into)] on_close: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <div class=format!("toast toast--{}", kind.as_str()) role="alert">
            <div class="toast__content">
                <span class="toast__message">{message}</span>
                {on_close.map(|on_close| view! {
                    <button
                        class="toast__close"
                        aria-label="Close notification"
                        on:click=move |_| on_close.run(())
                    >
                        "×"
                    </button>
                })}
            </div>
        </div>
    }
}

/// Shows the storage notice while it is active
#[component]
pub fn StorageToast() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_todo_context();

    move || {
        store.storage_error().get().map(|message| {
            view! {
                <Toast
                    message=message
                    kind=ToastKind::Warning
                    on_close=Callback::new(move |_| ctx.dismiss_storage_error())
                />
            }
        })
    }
}
