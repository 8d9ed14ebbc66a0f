//! # otp-dashboard
//!
//! Leptos + WASM dashboard for the OTP delivery service.
//!
//! This crate contains the session/authorization core (credential store,
//! HTTP gateway, session resolver, route guards) plus the pages and
//! components that sit on top of it. The SMTP, template, API-key, OTP and log
//! screens are thin placeholders routed behind the guards.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: installs logging and hydrates the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
