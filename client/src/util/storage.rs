//! Durable storage for the customer bearer token.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store persists exactly one value, the bearer token, under
//! `TOKEN_STORAGE_KEY`. Hydrate builds use `localStorage`; SSR and native test
//! builds see an always-empty store so server rendering starts logged out.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use crate::config::TOKEN_STORAGE_KEY;

/// Where the session store keeps its token between page loads.
pub trait TokenStorage {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// `localStorage`-backed token storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BrowserStorage {
    key: &'static str,
}

impl BrowserStorage {
    pub fn new(key: &'static str) -> Self {
        Self { key }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }
}

impl Default for BrowserStorage {
    fn default() -> Self {
        Self::new(TOKEN_STORAGE_KEY)
    }
}

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Warning text for a failed storage write, `None` when it succeeded.
#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
fn write_failure<E: std::fmt::Debug>(action: &str, key: &str, result: Result<(), E>) -> Option<String> {
    result.err().map(|e| format!("[storage] failed to {action} {key}: {e:?}"))
}

impl TokenStorage for BrowserStorage {
    fn load(&self) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            let raw = local_storage()?.get_item(self.key).ok().flatten()?;
            let token = raw.trim();
            (!token.is_empty()).then(|| token.to_owned())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    fn save(&self, token: &str) {
        #[cfg(feature = "hydrate")]
        {
            let Some(storage) = local_storage() else {
                leptos::logging::warn!("[storage] localStorage unavailable; token for {} not saved", self.key);
                return;
            };
            if let Some(msg) = write_failure("save", self.key, storage.set_item(self.key, token)) {
                leptos::logging::warn!("{msg}");
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
            let Some(storage) = local_storage() else {
                leptos::logging::warn!("[storage] localStorage unavailable; token for {} not cleared", self.key);
                return;
            };
            if let Some(msg) = write_failure("clear", self.key, storage.remove_item(self.key)) {
                leptos::logging::warn!("{msg}");
            }
        }
    }
}
