//! REST endpoint helpers for the auth flow.
//!
//! SYSTEM CONTEXT
//! ==============
//! Only the endpoints the session core depends on get typed wrappers here.
//! The CRUD screens call [`Gateway`] directly with the path constants below.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::gateway::{ApiFailure, Gateway, GatewayError, Method, Transport};
use super::types::{AuthResponse, Identity, LoginRequest, RegisterRequest};
use crate::util::credentials::CredentialStore;

pub const ME_PATH: &str = "/users/me";
pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const SMTP_PATH: &str = "/smtp";
pub const TEMPLATES_PATH: &str = "/templates";
pub const API_KEYS_PATH: &str = "/apikeys";
pub const OTP_SEND_PATH: &str = "/otp/send";
pub const LOGS_PATH: &str = "/logs";
pub const ADMIN_USERS_PATH: &str = "/admin/users";
pub const ADMIN_LOGS_PATH: &str = "/admin/logs";

const EMPTY_TOKEN: &str = "login response carried an empty accessToken";

/// Fetch the identity behind the stored credential via `GET /users/me`.
///
/// # Errors
///
/// Any non-2xx response means there is no valid session.
pub async fn fetch_identity<T: Transport, S: CredentialStore>(
    gateway: &Gateway<T, S>,
) -> Result<Identity, GatewayError> {
    gateway.get(ME_PATH).await
}

/// Exchange email + password for a credential and store it.
///
/// # Errors
///
/// Returns the gateway error unchanged, or a decode failure when the
/// backend answers 2xx with a blank `accessToken`. The stored credential is
/// untouched on failure.
pub async fn login<T: Transport, S: CredentialStore>(
    gateway: &Gateway<T, S>,
    request: &LoginRequest,
) -> Result<(), GatewayError> {
    let (status, resp): (u16, AuthResponse) = gateway.post_with_status(LOGIN_PATH, request).await?;
    if resp.access_token.trim().is_empty() {
        let failure = ApiFailure::Decode { status, message: EMPTY_TOKEN.to_owned() };
        return Err(gateway.reject(Method::Post, LOGIN_PATH, failure));
    }
    gateway.credentials().set(&resp.access_token);
    Ok(())
}

/// Create an account via `POST /auth/register`.
///
/// Registration does not sign the user in; they are sent to the login page.
///
/// # Errors
///
/// Returns the gateway error unchanged.
pub async fn register<T: Transport, S: CredentialStore>(
    gateway: &Gateway<T, S>,
    request: &RegisterRequest,
) -> Result<(), GatewayError> {
    let _: serde_json::Value = gateway.post(REGISTER_PATH, request).await?;
    Ok(())
}
