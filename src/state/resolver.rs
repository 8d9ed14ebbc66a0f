//! Session resolver: turns the stored credential into an identity.
//!
//! SYSTEM CONTEXT
//! ==============
//! The free functions are the whole session lifecycle: `bootstrap` or
//! `begin`, then `resolve`, then `finish`, plus `logout`. The Leptos provider
//! runs them against a signal; [`SessionResolver`] runs the same functions
//! against an owned [`SessionState`] for headless use and tests.
//!
//! A failed identity fetch always clears the credential. A stale or invalid
//! token is never retried silently.

#[cfg(test)]
#[path = "resolver_test.rs"]
mod resolver_test;

use super::session::{Resolution, ResolveTicket, SessionState, SessionStatus};
use crate::net::api;
use crate::net::gateway::{Gateway, Transport};
use crate::net::types::Identity;
use crate::util::credentials::CredentialStore;

/// Start a resolution, or settle straight to `Anonymous` when there is no
/// credential to resolve. Returns `None` in the latter case; no network
/// call is needed.
pub fn begin<S: CredentialStore>(state: &mut SessionState, credentials: &S) -> Option<ResolveTicket> {
    if credentials.is_present() {
        Some(state.begin_resolve())
    } else {
        state.invalidate();
        None
    }
}

/// [`begin`], but only for a session nothing has touched yet.
///
/// Returns `None` on every later call, so mounting twice never fetches twice.
pub fn bootstrap<S: CredentialStore>(state: &mut SessionState, credentials: &S) -> Option<ResolveTicket> {
    if matches!(state.status(), SessionStatus::Unresolved) {
        begin(state, credentials)
    } else {
        None
    }
}

/// Local-only logout: forget the credential and the identity.
///
/// Any resolution still in flight is made stale.
pub fn logout<S: CredentialStore>(state: &mut SessionState, credentials: &S) {
    credentials.clear();
    state.invalidate();
}

/// Ask the backend who the stored credential belongs to.
pub async fn resolve<T: Transport, S: CredentialStore>(gateway: &Gateway<T, S>) -> Resolution {
    if !gateway.credentials().is_present() {
        return Resolution::NoCredential;
    }
    match api::fetch_identity(gateway).await {
        Ok(identity) => Resolution::Identity(identity),
        Err(e) => {
            log::warn!("session rejected: {}", e.message);
            Resolution::Rejected
        }
    }
}

/// Apply a resolution, clearing the credential if it was rejected.
///
/// Stale tickets change nothing, including the credential, which may
/// already belong to a newer login.
pub fn finish<S: CredentialStore>(
    state: &mut SessionState,
    credentials: &S,
    ticket: ResolveTicket,
    resolution: Resolution,
) -> bool {
    let rejected = resolution == Resolution::Rejected;
    let applied = state.settle(ticket, resolution);
    if applied && rejected {
        credentials.clear();
    }
    applied
}

/// Owned resolver bound to one gateway.
pub struct SessionResolver<T, S> {
    gateway: Gateway<T, S>,
    state: SessionState,
}

impl<T: Transport, S: CredentialStore> SessionResolver<T, S> {
    pub fn new(gateway: Gateway<T, S>) -> Self {
        Self { gateway, state: SessionState::default() }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn gateway(&self) -> &Gateway<T, S> {
        &self.gateway
    }

    /// Resolve the stored credential once per resolver lifetime.
    ///
    /// Later calls return the current status without touching the network.
    pub async fn bootstrap(&mut self) -> &SessionStatus {
        let ticket = bootstrap(&mut self.state, self.gateway.credentials());
        self.run(ticket).await;
        self.state.status()
    }

    /// Re-resolve the identity, e.g. after a login or a role change.
    pub async fn refresh(&mut self) -> Option<Identity> {
        let ticket = begin(&mut self.state, self.gateway.credentials());
        self.run(ticket).await;
        self.state.identity().cloned()
    }

    pub fn logout(&mut self) {
        logout(&mut self.state, self.gateway.credentials());
    }

    async fn run(&mut self, ticket: Option<ResolveTicket>) {
        if let Some(ticket) = ticket {
            let resolution = resolve(&self.gateway).await;
            finish(&mut self.state, self.gateway.credentials(), ticket, resolution);
        }
    }
}
