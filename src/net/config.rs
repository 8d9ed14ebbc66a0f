//! Backend address configuration.
//!
//! The base URL is baked in at compile time from `OTP_API_URL`, the same way
//! a bundler inlines environment values into a browser build. When unset the
//! dashboard talks to a relative `/api` prefix served by the same origin.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "/api";

/// Resolved settings for the HTTP gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_API_BASE_URL.to_owned() }
    }
}

impl ApiConfig {
    /// Build config from compile-time environment.
    ///
    /// Optional:
    /// - `OTP_API_URL`: backend base URL, default `/api`
    pub fn from_env() -> Self {
        Self { base_url: resolve_base_url(option_env!("OTP_API_URL")) }
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self { base_url: resolve_base_url(Some(base_url)) }
    }

    /// Join the base URL with an endpoint path.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_owned();
        }
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            return self.base_url.clone();
        }
        format!("{}/{path}", self.base_url)
    }
}

/// Normalize a raw base URL, falling back to the default for blank input.
pub fn resolve_base_url(raw: Option<&str>) -> String {
    let trimmed = raw.map(str::trim).unwrap_or_default().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_BASE_URL.to_owned()
    } else {
        trimmed.to_owned()
    }
}
