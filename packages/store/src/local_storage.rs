//! # Browser `localStorage` store
//!
//! [`LocalStorageStore`] is the [`KeyValueStore`] used on the **web platform**.
//! Entries are scoped to the page origin by the browser and survive reloads.
//!
//! `localStorage` throws on quota overflow and may be missing entirely (private
//! browsing, sandboxed iframes). Both cases become a [`StorageError`]; the
//! store never panics.

use wasm_bindgen::JsValue;
use web_sys::Storage;

use crate::kv::{KeyValueStore, StorageError};

/// `window.localStorage`-backed KeyValueStore. Zero-size; the storage handle is
/// looked up on every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage(&self) -> Result<Storage, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
        window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_string()))
    }
}

fn js_error(value: JsValue) -> StorageError {
    StorageError::Unavailable(format!("{value:?}"))
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // The only exception setItem raises on a live storage area is
        // QuotaExceededError.
        self.storage()?
            .set_item(key, value)
            .map_err(|_| StorageError::QuotaExceeded {
                key: key.to_string(),
            })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.storage()?.remove_item(key).map_err(js_error)
    }
}
