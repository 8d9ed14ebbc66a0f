//! Session state machine for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Read by route guards and identity-aware components; mutated only through
//! the resolver's transitions (`begin_resolve`, `settle`, `invalidate`).
//!
//! DESIGN
//! ======
//! Each resolution is tagged with a generation ticket. Settling a ticket that
//! is no longer current is a no-op, so a response that arrives after logout
//! or after a newer refresh is dropped instead of resurrecting old state.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::types::Identity;

/// Where the session is in its lifecycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionStatus {
    /// App just started; nothing has been checked yet.
    #[default]
    Unresolved,
    /// An identity fetch is in flight. `previous` stays visible meanwhile.
    Resolving { previous: Option<Identity> },
    Resolved(Identity),
    /// No credential, or the backend rejected it.
    Anonymous,
}

/// Proof that a resolution was started at a particular generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolveTicket(u64);

/// Result of asking the backend who the credential belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Identity(Identity),
    /// The fetch failed; the credential must be discarded.
    Rejected,
    NoCredential,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    status: SessionStatus,
    generation: u64,
    settled_once: bool,
}

impl SessionState {
    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    /// True until the first resolution settles. The app shell shows a loader
    /// instead of any route while this holds.
    pub fn is_bootstrapping(&self) -> bool {
        !self.settled_once
    }

    pub fn is_resolving(&self) -> bool {
        matches!(self.status, SessionStatus::Resolving { .. })
    }

    /// The identity consumers should display right now.
    ///
    /// During a refresh this is the previous identity.
    pub fn identity(&self) -> Option<&Identity> {
        match &self.status {
            SessionStatus::Resolved(identity) => Some(identity),
            SessionStatus::Resolving { previous } => previous.as_ref(),
            SessionStatus::Unresolved | SessionStatus::Anonymous => None,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.status == SessionStatus::Anonymous
    }

    /// Enter `Resolving`, superseding any resolution already in flight.
    pub fn begin_resolve(&mut self) -> ResolveTicket {
        self.generation += 1;
        let previous = self.identity().cloned();
        self.status = SessionStatus::Resolving { previous };
        ResolveTicket(self.generation)
    }

    /// Apply a resolution. Returns `false` when the ticket is stale.
    pub fn settle(&mut self, ticket: ResolveTicket, resolution: Resolution) -> bool {
        if ticket.0 != self.generation {
            return false;
        }
        self.status = match resolution {
            Resolution::Identity(identity) => SessionStatus::Resolved(identity),
            Resolution::Rejected | Resolution::NoCredential => SessionStatus::Anonymous,
        };
        self.settled_once = true;
        true
    }

    /// Drop to `Anonymous` immediately and orphan any in-flight resolution.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.status = SessionStatus::Anonymous;
        self.settled_once = true;
    }
}
