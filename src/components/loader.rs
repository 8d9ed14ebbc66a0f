use leptos::prelude::*;

/// Full-area spinner shown while the session is pending.
#[component]
pub fn Loader() -> impl IntoView {
    view! {
        <div class="loader" role="status" aria-label="Loading">
            <span class="loader__spinner"></span>
        </div>
    }
}
