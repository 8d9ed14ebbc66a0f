//! HTTP gateway: the single chokepoint for backend calls.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every request goes through [`Gateway::request`], which attaches the bearer
//! token from the credential store and normalizes failures into one shape.
//! The browser transport is `gloo-net`; tests swap in scripted transports.
//!
//! ERROR HANDLING
//! ==============
//! Each failure is logged exactly once as
//! `[API] <METHOD> <URL> -> <STATUS|NO_STATUS>: <MESSAGE>` and returned to the
//! caller with the original [`ApiFailure`] attached. The gateway observes
//! failures, it never swallows or retries them.

#![allow(async_fn_in_trait)]

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::config::ApiConfig;
use crate::util::credentials::CredentialStore;

/// Message used when neither the server nor the transport said anything.
pub const FALLBACK_MESSAGE: &str = "Request failed";

/// HTTP verbs used against the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully-built outgoing request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response as seen by the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Network-level failure reported by a transport (no HTTP status).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Something that can put an [`HttpRequest`] on the wire.
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// The underlying failure, preserved unchanged for callers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiFailure {
    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(TransportError),

    /// The backend answered with a non-2xx status.
    #[error("HTTP status {status}")]
    Status { status: u16, body: String },

    /// A 2xx body could not be decoded.
    #[error("response decode failed: {message}")]
    Decode { status: u16, message: String },

    /// The request body could not be encoded.
    #[error("request encode failed: {0}")]
    Encode(String),
}

impl ApiFailure {
    /// HTTP status if the backend responded at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } | Self::Decode { status, .. } => Some(*status),
            Self::Transport(_) | Self::Encode(_) => None,
        }
    }

    /// Parsed JSON body of an error response.
    fn body_json(&self) -> Option<serde_json::Value> {
        match self {
            Self::Status { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }

    /// The message the transport layer itself attached to the failure.
    fn transport_message(&self) -> Option<String> {
        match self {
            Self::Transport(e) => Some(e.0.clone()),
            Self::Status { status, .. } => Some(format!("Request failed with status code {status}")),
            Self::Decode { message, .. } | Self::Encode(message) => Some(message.clone()),
        }
    }
}

/// Normalized failure of a gateway call.
///
/// `Display` renders the one-line diagnostic that is logged for the failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("[API] {method} {url} -> {}: {message}", status_label(.status))]
pub struct GatewayError {
    pub method: Method,
    pub url: String,
    pub status: Option<u16>,
    pub message: String,
    #[source]
    pub failure: ApiFailure,
}

impl GatewayError {
    fn new(method: Method, url: String, failure: ApiFailure) -> Self {
        let message = resolve_message(failure.body_json().as_ref(), failure.transport_message().as_deref());
        Self { method, url, status: failure.status(), message, failure }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }

    /// The `message` field of the backend's error body, if it sent one.
    ///
    /// Forms show this verbatim and fall back to their own wording otherwise.
    pub fn server_message(&self) -> Option<String> {
        body_field(self.failure.body_json().as_ref(), "message").map(str::to_owned)
    }
}

#[allow(clippy::ref_option)]
fn status_label(status: &Option<u16>) -> String {
    status.map_or_else(|| "NO_STATUS".to_owned(), |s| s.to_string())
}

/// Pick the user-facing message for a failure.
///
/// Precedence: body `message`, body `error`, transport message, then
/// [`FALLBACK_MESSAGE`]. Blank strings never win.
pub fn resolve_message(body: Option<&serde_json::Value>, transport_message: Option<&str>) -> String {
    body_field(body, "message")
        .or_else(|| body_field(body, "error"))
        .or(transport_message.filter(|s| !s.trim().is_empty()))
        .unwrap_or(FALLBACK_MESSAGE)
        .to_owned()
}

fn body_field<'a>(body: Option<&'a serde_json::Value>, field: &str) -> Option<&'a str> {
    body.and_then(|b| b.get(field))
        .and_then(serde_json::Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

/// REST client bound to a transport and a credential store.
#[derive(Clone, Debug)]
pub struct Gateway<T, S> {
    config: ApiConfig,
    transport: T,
    credentials: S,
}

impl<T: Transport, S: CredentialStore> Gateway<T, S> {
    pub fn new(config: ApiConfig, transport: T, credentials: S) -> Self {
        Self { config, transport, credentials }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn credentials(&self) -> &S {
        &self.credentials
    }

    /// Build the outgoing request, attaching the bearer token when present.
    pub fn build_request(&self, method: Method, path: &str, body: Option<String>) -> HttpRequest {
        let mut headers = Vec::new();
        if body.is_some() {
            headers.push(("Content-Type".to_owned(), "application/json".to_owned()));
        }
        if let Some(token) = self.credentials.get() {
            headers.push(("Authorization".to_owned(), format!("Bearer {token}")));
        }
        HttpRequest { method, url: self.config.url_for(path), headers, body }
    }

    /// Send one request and return the decoded JSON body.
    ///
    /// Empty 2xx bodies decode as `null`.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] for transport failures, non-2xx statuses,
    /// and undecodable success bodies.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<serde_json::Value, GatewayError> {
        let encoded = body.map(serde_json::Value::to_string);
        self.dispatch(method, path, encoded).await.map(|(_, value)| value)
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<(u16, serde_json::Value), GatewayError> {
        let request = self.build_request(method, path, body);
        let url = request.url.clone();

        let outcome = match self.transport.send(request).await {
            Err(e) => Err(ApiFailure::Transport(e)),
            Ok(resp) if !resp.is_success() => Err(ApiFailure::Status { status: resp.status, body: resp.body }),
            Ok(resp) => decode_body(&resp).map(|value| (resp.status, value)),
        };

        outcome.map_err(|failure| self.fail(method, url, failure))
    }

    fn fail(&self, method: Method, url: String, failure: ApiFailure) -> GatewayError {
        let err = GatewayError::new(method, url, failure);
        log::error!("{err}");
        err
    }

    /// Turn a failure found after a successful call (e.g. a semantically
    /// invalid body) into a logged [`GatewayError`].
    pub(crate) fn reject(&self, method: Method, path: &str, failure: ApiFailure) -> GatewayError {
        self.fail(method, self.config.url_for(path), failure)
    }

    async fn call<B, R>(&self, method: Method, path: &str, body: Option<&B>) -> Result<R, GatewayError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.call_with_status(method, path, body).await.map(|(_, value)| value)
    }

    async fn call_with_status<B, R>(&self, method: Method, path: &str, body: Option<&B>) -> Result<(u16, R), GatewayError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let encoded = match body.map(serde_json::to_string).transpose() {
            Ok(encoded) => encoded,
            Err(e) => {
                let url = self.config.url_for(path);
                return Err(self.fail(method, url, ApiFailure::Encode(e.to_string())));
            }
        };

        let (status, value) = self.dispatch(method, path, encoded).await?;
        serde_json::from_value(value).map(|decoded| (status, decoded)).map_err(|e| {
            let url = self.config.url_for(path);
            self.fail(method, url, ApiFailure::Decode { status, message: e.to_string() })
        })
    }

    /// `GET` and deserialize.
    ///
    /// # Errors
    ///
    /// See [`Gateway::request`].
    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, GatewayError> {
        self.call::<(), R>(Method::Get, path, None).await
    }

    /// `POST` a JSON body and deserialize.
    ///
    /// # Errors
    ///
    /// See [`Gateway::request`].
    pub async fn post<B: Serialize + ?Sized, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, GatewayError> {
        self.call(Method::Post, path, Some(body)).await
    }

    /// `POST` a JSON body and deserialize, keeping the response status.
    pub(crate) async fn post_with_status<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(u16, R), GatewayError> {
        self.call_with_status(Method::Post, path, Some(body)).await
    }

    /// `PUT` a JSON body and deserialize.
    ///
    /// # Errors
    ///
    /// See [`Gateway::request`].
    pub async fn put<B: Serialize + ?Sized, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, GatewayError> {
        self.call(Method::Put, path, Some(body)).await
    }

    /// `PATCH` a JSON body and deserialize.
    ///
    /// # Errors
    ///
    /// See [`Gateway::request`].
    pub async fn patch<B: Serialize + ?Sized, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, GatewayError> {
        self.call(Method::Patch, path, Some(body)).await
    }

    /// `DELETE` and deserialize.
    ///
    /// # Errors
    ///
    /// See [`Gateway::request`].
    pub async fn delete<R: DeserializeOwned>(&self, path: &str) -> Result<R, GatewayError> {
        self.call::<(), R>(Method::Delete, path, None).await
    }
}

fn decode_body(resp: &HttpResponse) -> Result<serde_json::Value, ApiFailure> {
    if resp.body.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_str(&resp.body).map_err(|e| ApiFailure::Decode { status: resp.status, message: e.to_string() })
}

// =============================================================================
// BROWSER TRANSPORT
// =============================================================================

/// `fetch`-based transport via `gloo-net`.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

#[cfg(feature = "hydrate")]
impl Transport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        use gloo_net::http::{Method as GlooMethod, RequestBuilder};

        let method = match request.method {
            Method::Get => GlooMethod::GET,
            Method::Post => GlooMethod::POST,
            Method::Put => GlooMethod::PUT,
            Method::Patch => GlooMethod::PATCH,
            Method::Delete => GlooMethod::DELETE,
        };

        let mut builder = RequestBuilder::new(&request.url).method(method);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let sent = match request.body {
            Some(body) => builder.body(body).map_err(|e| TransportError(e.to_string()))?.send().await,
            None => builder.send().await,
        };
        let resp = sent.map_err(|e| TransportError(e.to_string()))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| TransportError(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}

/// Gateway wired to the browser transport and `localStorage` credentials.
#[cfg(feature = "hydrate")]
pub type BrowserGateway = Gateway<GlooTransport, crate::util::credentials::LocalStorageCredentials>;

/// Build the gateway used by pages and the session provider.
#[cfg(feature = "hydrate")]
pub fn browser_gateway() -> BrowserGateway {
    Gateway::new(ApiConfig::from_env(), GlooTransport, crate::util::credentials::LocalStorageCredentials)
}
