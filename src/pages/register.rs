//! Registration page. A new account is not signed in; the user is sent to
//! the login page afterwards.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use super::login::looks_like_email;
use crate::components::toast_host::show_toast;
use crate::net::types::RegisterRequest;
use crate::state::guard::LOGIN_ROUTE;
use crate::state::toast::{ToastKind, ToastState};

pub const MIN_PASSWORD_LEN: usize = 6;
pub const REGISTER_FAILED: &str = "Registration failed";
/// Pause after the success toast before moving to the login page.
pub const REDIRECT_DELAY_MS: u32 = 1_000;

/// Trim and check the registration form.
///
/// # Errors
///
/// Returns the message to show when a field is missing or malformed.
pub fn validate_register_input(full_name: &str, email: &str, password: &str) -> Result<RegisterRequest, &'static str> {
    let full_name = full_name.trim();
    let email = email.trim();
    if full_name.is_empty() || email.is_empty() || password.is_empty() {
        return Err("Fill in every field.");
    }
    if !looks_like_email(email) {
        return Err("Enter a valid email address.");
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 6 characters.");
    }
    Ok(RegisterRequest { full_name: full_name.to_owned(), email: email.to_owned(), password: password.to_owned() })
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();
    let navigate = use_navigate();

    let full_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let request = match validate_register_input(&full_name.get(), &email.get(), &password.get()) {
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
                match crate::net::api::register(&gateway, &request).await {
                    Ok(()) => {
                        show_toast(toasts, ToastKind::Success, "Account created. Log in now!");
                        gloo_timers::future::TimeoutFuture::new(REDIRECT_DELAY_MS).await;
                        navigate(LOGIN_ROUTE, NavigateOptions::default());
                    }
                    Err(e) => {
                        let message = e.server_message().unwrap_or_else(|| REGISTER_FAILED.to_owned());
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
            <form class="auth-card auth-form" on:submit=on_submit>
                <h1>"Create Account"</h1>
                <input
                    class="auth-form__input"
                    type="text"
                    placeholder="Full Name"
                    required
                    prop:value=move || full_name.get()
                    on:input=move |ev| full_name.set(event_target_value(&ev))
                />
                <input
                    class="auth-form__input"
                    type="email"
                    placeholder="Email Address"
                    required
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    class="auth-form__input"
                    type="password"
                    placeholder="Password"
                    minlength=MIN_PASSWORD_LEN.to_string()
                    required
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <button class="auth-form__submit" type="submit" disabled=move || busy.get()>
                    "Sign Up"
                </button>
                <p class="auth-card__footer">
                    "Already have an account? "
                    <A href=LOGIN_ROUTE>"Login →"</A>
                </p>
            </form>
        </div>
    }
}
