//! App-lifetime session context.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted once around the router. On mount (browser only) it bootstraps the
//! session and installs a `storage` listener so a logout or login in another
//! tab is reflected here. Nothing below it renders until the bootstrap
//! settles, which keeps guards from ever seeing the first `Resolving` state.

use leptos::prelude::*;

use crate::components::loader::Loader;
use crate::net::types::Identity;
use crate::state::guard::{GuardDecision, GuardPolicy};
use crate::state::resolver;
#[cfg(feature = "hydrate")]
use crate::state::session::ResolveTicket;
use crate::state::session::SessionState;
use crate::util::credentials::LocalStorageCredentials;

/// Read handle plus the two sanctioned mutators, shared via context.
#[derive(Clone, Copy)]
pub struct SessionContext {
    state: RwSignal<SessionState>,
}

impl SessionContext {
    pub fn state(self) -> ReadSignal<SessionState> {
        self.state.read_only()
    }

    pub fn identity(self) -> Option<Identity> {
        self.state.with(|s| s.identity().cloned())
    }

    pub fn decide(self, policy: GuardPolicy) -> GuardDecision {
        self.state.with(|s| policy.decide(s))
    }

    /// Re-resolve the identity in the background.
    pub fn refresh(self) {
        #[cfg(feature = "hydrate")]
        spawn_resolution(self.state, resolver::begin);
    }

    /// Forget the credential and drop to anonymous. No backend call.
    pub fn logout(self) {
        self.state.update(|s| resolver::logout(s, &LocalStorageCredentials));
    }
}

#[cfg(feature = "hydrate")]
type StartStep = fn(&mut SessionState, &LocalStorageCredentials) -> Option<ResolveTicket>;

#[cfg(feature = "hydrate")]
fn spawn_resolution(state: RwSignal<SessionState>, start: StartStep) {
    let gateway = crate::net::gateway::browser_gateway();
    let Some(ticket) = state.try_update(|s| start(s, gateway.credentials())).flatten() else {
        return;
    };

    leptos::task::spawn_local(async move {
        let resolution = resolver::resolve(&gateway).await;
        // A disposed signal or stale ticket just drops the result.
        state.try_update(|s| resolver::finish(s, gateway.credentials(), ticket, resolution));
    });
}

#[cfg(feature = "hydrate")]
fn install_storage_listener(session: SessionContext) {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    use crate::util::credentials::{StorageChange, classify_storage_change};

    let Some(window) = web_sys::window() else {
        return;
    };

    let on_storage = Closure::<dyn FnMut(web_sys::StorageEvent)>::new(move |ev: web_sys::StorageEvent| {
        match classify_storage_change(ev.key().as_deref(), ev.new_value().as_deref()) {
            Some(StorageChange::Cleared) => {
                session.state.try_update(SessionState::invalidate);
            }
            Some(StorageChange::Replaced) => session.refresh(),
            None => {}
        }
    });

    if window
        .add_event_listener_with_callback("storage", on_storage.as_ref().unchecked_ref())
        .is_err()
    {
        leptos::logging::warn!("failed to watch storage; cross-tab logout will not propagate");
    }
    // Lives as long as the app.
    on_storage.forget();
}

/// Provides [`SessionContext`] and holds rendering until bootstrap settles.
#[component]
pub fn SessionProvider(children: ChildrenFn) -> impl IntoView {
    let state = RwSignal::new(SessionState::default());
    let session = SessionContext { state };
    provide_context(session);

    #[cfg(feature = "hydrate")]
    Effect::new(move || {
        spawn_resolution(state, resolver::bootstrap);
        install_storage_listener(session);
    });

    view! {
        <Show
            when=move || !state.with(SessionState::is_bootstrapping)
            fallback=|| view! { <Loader/> }
        >
            {children()}
        </Show>
    }
}
