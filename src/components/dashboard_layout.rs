use leptos::prelude::*;

use crate::components::sidebar::Sidebar;

/// Sidebar + content frame shared by every dashboard route.
#[component]
pub fn DashboardLayout(children: Children) -> impl IntoView {
    view! {
        <div class="layout">
            <Sidebar/>
            <main class="layout__content">{children()}</main>
        </div>
    }
}
