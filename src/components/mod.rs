//! Reusable Leptos components.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session_provider` and `route_guard` are the view side of the session
//! core; the rest is dashboard chrome.

pub mod dashboard_layout;
pub mod loader;
pub mod route_guard;
pub mod session_provider;
pub mod sidebar;
pub mod toast_host;
