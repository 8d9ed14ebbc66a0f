//! Routed pages.

pub mod dashboard;
pub mod login;
pub mod register;
