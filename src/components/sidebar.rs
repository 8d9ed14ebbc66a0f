//! Dashboard navigation sidebar.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::components::session_provider::SessionContext;
use crate::pages::dashboard::Section;
use crate::state::guard::LOGIN_ROUTE;

/// Shows who is signed in, the section links, admin links for admins, and
/// the logout button.
#[component]
pub fn Sidebar() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let navigate = use_navigate();

    let is_admin = move || session.identity().is_some_and(|i| i.is_admin());

    let on_logout = move |_| {
        session.logout();
        navigate(LOGIN_ROUTE, NavigateOptions { replace: true, ..NavigateOptions::default() });
    };

    view! {
        <aside class="sidebar">
            <h2 class="sidebar__title">"OTP SaaS"</h2>

            <div class="sidebar__user">
                <strong>{move || session.identity().map(|i| i.full_name).unwrap_or_default()}</strong>
                <small>{move || session.identity().map(|i| i.email).unwrap_or_default()}</small>
            </div>

            <nav class="sidebar__nav">
                {Section::USER
                    .into_iter()
                    .map(|section| view! { <A href=section.route()>{section.label()}</A> })
                    .collect_view()}
                <Show when=is_admin>
                    <hr/>
                    {Section::ADMIN
                        .into_iter()
                        .map(|section| view! { <A href=section.route()>{section.label()}</A> })
                        .collect_view()}
                </Show>
            </nav>

            <button class="sidebar__logout" on:click=on_logout>
                "Logout"
            </button>
        </aside>
    }
}
