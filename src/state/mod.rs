//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern so the session machine, the guard decisions and
//! the toast queue can each be tested without a browser. `session` and
//! `toast` values live in signals; `resolver` and `guard` are plain logic
//! over them.

pub mod guard;
pub mod resolver;
pub mod session;
pub mod toast;
