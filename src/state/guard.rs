//! Route gating decisions.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guards are pure functions of [`SessionState`]. They never start a
//! resolution themselves; the session provider does that once at startup.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use super::session::SessionState;

/// Where anonymous visitors are sent.
pub const LOGIN_ROUTE: &str = "/login";
/// Default page for signed-in users, and where non-admins are bounced to.
pub const LANDING_ROUTE: &str = "/dashboard";

/// What a guarded route should do right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// No identity has resolved yet; show a loader and nothing else.
    Pending,
    Render,
    /// Navigate away, replacing the history entry.
    Redirect(&'static str),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardPolicy {
    /// Any resolved identity.
    Authenticated,
    /// A resolved identity with the admin role.
    Admin,
}

impl GuardPolicy {
    pub fn decide(self, state: &SessionState) -> GuardDecision {
        if let Some(identity) = state.identity() {
            return match self {
                Self::Authenticated => GuardDecision::Render,
                Self::Admin if identity.is_admin() => GuardDecision::Render,
                Self::Admin => GuardDecision::Redirect(LANDING_ROUTE),
            };
        }
        if state.is_anonymous() {
            GuardDecision::Redirect(LOGIN_ROUTE)
        } else {
            GuardDecision::Pending
        }
    }
}
