//! Networking modules for the REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `gateway` is the single chokepoint for every HTTP call, `config` resolves
//! the backend base address, `api` wraps the auth endpoints the session core
//! depends on, and `types` defines the shared wire schema.

pub mod api;
pub mod config;
pub mod gateway;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;
