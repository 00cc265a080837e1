//! # `localStorage`-backed store — browser-side persistence
//!
//! [`LocalStore`] is the [`KeyValueStore`] used on the **web platform**. It
//! resolves `window.localStorage` on every call rather than caching the
//! handle, because the storage area can be unavailable (private browsing,
//! sandboxed iframes) and access itself may throw.
//!
//! ## Error handling
//!
//! All methods silently swallow errors: reads return `None`, writes do
//! nothing. Missing storage degrades to "no saved profile", which the
//! controllers already handle as a first visit.

use crate::kv::KeyValueStore;

#[derive(Clone, Debug, Default)]
pub struct LocalStore;

impl LocalStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(key, value).is_err() {
                tracing::warn!(key, "localStorage write rejected");
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}
