//! Login page: email + password exchanged for a bearer token.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::components::session_provider::SessionContext;
use crate::components::toast_host::show_toast;
use crate::net::types::LoginRequest;
use crate::state::guard::LANDING_ROUTE;
use crate::state::toast::{ToastKind, ToastState};

pub const LOGIN_FAILED: &str = "Login failed";

/// Trim and check the login form.
///
/// # Errors
///
/// Returns the message to show when a field is missing or malformed.
pub fn validate_login_input(email: &str, password: &str) -> Result<LoginRequest, &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter your email and password.");
    }
    if !looks_like_email(email) {
        return Err("Enter a valid email address.");
    }
    Ok(LoginRequest { email: email.to_owned(), password: password.to_owned() })
}

pub(crate) fn looks_like_email(email: &str) -> bool {
    email
        .split_once('@')
        .is_some_and(|(user, domain)| !user.is_empty() && !domain.is_empty())
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    // Already signed in (or just signed in): go to the dashboard.
    let navigate_home = navigate.clone();
    Effect::new(move || {
        if session.identity().is_some() {
            navigate_home(LANDING_ROUTE, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let request = match validate_login_input(&email.get(), &password.get()) {
            Ok(request) => request,
            Err(msg) => {
                show_toast(toasts, ToastKind::Error, msg);
                return;
            }
        };
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let gateway = crate::net::gateway::browser_gateway();
                match crate::net::api::login(&gateway, &request).await {
                    Ok(()) => {
                        show_toast(toasts, ToastKind::Success, "Login successful");
                        session.refresh();
                        navigate(LANDING_ROUTE, NavigateOptions::default());
                    }
                    Err(e) => {
                        let message = e.server_message().unwrap_or_else(|| LOGIN_FAILED.to_owned());
                        show_toast(toasts, ToastKind::Error, message);
                    }
                }
                busy.try_set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (request, &navigate);
            busy.set(false);
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Welcome Back"</h1>
                <p class="auth-card__subtitle">"Sign in to your OTP SaaS account"</p>
                <form class="auth-form" on:submit=on_submit>
                    <label class="auth-form__label">
                        "Email Address"
                        <input
                            class="auth-form__input"
                            type="email"
                            placeholder="you@example.com"
                            required
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="auth-form__label">
                        "Password"
                        <input
                            class="auth-form__input"
                            type="password"
                            required
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </label>
                    <button class="auth-form__submit" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
                <p class="auth-card__footer">
                    "Don't have an account? "
                    <A href="/register">"Create one"</A>
                </p>
            </div>
        </div>
    }
}
