//! # Browser `localStorage` backend
//!
//! [`LocalStorage`] is the [`KeyValueStorage`] used on the web platform. Each
//! store's projection lives under its own key (`auth-storage`,
//! `meeting-storage`), which is also where the previous web client kept it.
//!
//! ## Error handling
//!
//! All methods silently swallow errors. Private browsing, a full quota or a
//! disabled storage degrade to "nothing persisted" rather than breaking the
//! page; the server remains the source of truth for the session.

use crate::persist::KeyValueStorage;

/// `window.localStorage`, looked up on every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStorage for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set_item(&self, key: &str, value: &str) {
        let Some(storage) = Self::storage() else {
            return;
        };
        if storage.set_item(key, value).is_err() {
            tracing::warn!("localStorage rejected write for {}", key);
        }
    }

    fn remove_item(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}
