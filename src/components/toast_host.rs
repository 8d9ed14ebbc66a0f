//! Toast notifications overlay.

use leptos::prelude::*;

use crate::state::toast::{Toast, ToastKind, ToastState};

/// How long a toast stays up before dismissing itself.
pub const TOAST_TTL_MS: u32 = 4_000;

/// Push a toast and schedule its dismissal.
pub fn show_toast(toasts: RwSignal<ToastState>, kind: ToastKind, message: impl Into<String>) {
    let message = message.into();
    let Some(id) = toasts.try_update(|t| t.push(kind, message)) else {
        return;
    };

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(TOAST_TTL_MS).await;
        toasts.try_update(|t| t.dismiss(id));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = id;
}

/// Top-right stack of active toasts. Click to dismiss early.
#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <div class="toast-host" aria-live="polite">
            <For
                each=move || toasts.get().toasts
                key=|toast| toast.id
                children=move |toast: Toast| {
                    let id = toast.id;
                    view! {
                        <div
                            class=toast.kind.css_class()
                            on:click=move |_| toasts.update(|t| t.dismiss(id))
                        >
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
