//! Guard components wrapping protected routes.
//!
//! SYSTEM CONTEXT
//! ==============
//! Thin view adapters over [`GuardPolicy::decide`]. Redirects replace the
//! history entry so the back button does not loop into the guard again.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::loader::Loader;
use crate::components::session_provider::SessionContext;
use crate::state::guard::{GuardDecision, GuardPolicy};

/// Renders children for any signed-in user.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    guarded(GuardPolicy::Authenticated, children)
}

/// Renders children for admins; other signed-in users go to the landing page.
#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    guarded(GuardPolicy::Admin, children)
}

fn guarded(policy: GuardPolicy, children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let navigate = use_navigate();

    let decision = Memo::new(move |_| session.decide(policy));

    Effect::new(move || {
        if let GuardDecision::Redirect(to) = decision.get() {
            navigate(to, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    move || match decision.get() {
        GuardDecision::Render => children().into_any(),
        GuardDecision::Pending | GuardDecision::Redirect(_) => view! { <Loader/> }.into_any(),
    }
}
