//! Credential store for the bearer token.
//!
//! SYSTEM CONTEXT
//! ==============
//! The token is the only durable session state. It lives under a single
//! `localStorage` key so it survives reloads; everything else about the
//! session is re-derived from the backend. Only the session resolver and the
//! login/logout flows write it.

#[cfg(test)]
#[path = "credentials_test.rs"]
mod credentials_test;

use std::cell::RefCell;
use std::rc::Rc;

/// `localStorage` key holding the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Owner of the opaque bearer token.
///
/// `clear` must be idempotent. Implementations never validate token shape.
pub trait CredentialStore {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str);
    fn clear(&self);

    fn is_present(&self) -> bool {
        self.get().is_some()
    }
}

/// Browser `localStorage` backed store. On the server it is always empty.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageCredentials;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    match web_sys::window()?.local_storage() {
        Ok(storage) => storage,
        Err(_) => {
            log::warn!("localStorage unavailable; treating session as absent");
            None
        }
    }
}

impl CredentialStore for LocalStorageCredentials {
    fn get(&self) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            let token = local_storage()?.get_item(TOKEN_KEY).ok().flatten()?;
            normalize_token(Some(&token))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    fn set(&self, token: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                warn_on_storage_failure(storage.set_item(TOKEN_KEY, token), "persist");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = token;
        }
    }

    fn clear(&self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                warn_on_storage_failure(storage.remove_item(TOKEN_KEY), "remove");
            }
        }
    }
}

/// Log a failed `localStorage` write. Returns whether it failed.
#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
fn warn_on_storage_failure<E>(result: Result<(), E>, action: &str) -> bool {
    let failed = result.is_err();
    if failed {
        log::warn!("failed to {action} session token");
    }
    failed
}

/// In-memory store shared between clones.
#[derive(Clone, Debug, Default)]
pub struct MemoryCredentials {
    token: Rc<RefCell<Option<String>>>,
}

impl MemoryCredentials {
    pub fn with_token(token: &str) -> Self {
        let store = Self::default();
        store.set(token);
        store
    }
}

impl CredentialStore for MemoryCredentials {
    fn get(&self) -> Option<String> {
        normalize_token(self.token.borrow().as_deref())
    }

    fn set(&self, token: &str) {
        *self.token.borrow_mut() = Some(token.to_owned());
    }

    fn clear(&self) {
        self.token.borrow_mut().take();
    }
}

/// Treat empty stored values as "no credential".
fn normalize_token(raw: Option<&str>) -> Option<String> {
    raw.filter(|t| !t.is_empty()).map(str::to_owned)
}

/// What another tab's write to storage means for this tab's session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageChange {
    /// The token was removed elsewhere; drop the in-memory identity.
    Cleared,
    /// A token was written elsewhere; re-resolve the identity.
    Replaced,
}

/// Classify a `storage` event.
///
/// A `None` key means the whole storage area was cleared.
pub fn classify_storage_change(key: Option<&str>, new_value: Option<&str>) -> Option<StorageChange> {
    match key {
        None => Some(StorageChange::Cleared),
        Some(TOKEN_KEY) => match normalize_token(new_value) {
            Some(_) => Some(StorageChange::Replaced),
            None => Some(StorageChange::Cleared),
        },
        Some(_) => None,
    }
}
