//! # Session store — the persisted credential pair
//!
//! [`SessionStore`] owns the bearer token and the user record of the signed-in
//! user. It is an explicit handle: the authorization attachment, the route gate
//! and the task list controller each receive a clone instead of reaching for a
//! global. Clones share the underlying [`KeyValueStore`].
//!
//! ## Persistence
//!
//! Two entries are written (key names from [`SessionKeys`]):
//!
//! | Key | Value |
//! |-----|-------|
//! | `access_token` | the opaque token string |
//! | `current_user` | the [`UserInfo`] as JSON |
//!
//! ## Error handling
//!
//! Storage failures never reach callers. Writes are logged and leave the
//! session logically unset; reads of missing, unreadable or malformed entries
//! are logged and read as absent.

use tracing::{error, warn};

use crate::config::StorageConfig;
use crate::kv::KeyValueStore;
use crate::models::{Session, UserInfo};

/// Storage key names for the two session entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionKeys {
    pub token_key: String,
    pub user_key: String,
}

impl Default for SessionKeys {
    fn default() -> Self {
        StorageConfig::default().into()
    }
}

impl From<StorageConfig> for SessionKeys {
    fn from(config: StorageConfig) -> Self {
        Self {
            token_key: config.token_key,
            user_key: config.user_key,
        }
    }
}

/// Handle to the persisted session.
#[derive(Clone, Debug)]
pub struct SessionStore<S: KeyValueStore> {
    store: S,
    keys: SessionKeys,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Create a session store using the default key names.
    pub fn new(store: S) -> Self {
        Self::with_keys(store, SessionKeys::default())
    }

    pub fn with_keys(store: S, keys: SessionKeys) -> Self {
        Self { store, keys }
    }

    /// Persist the token and user as a pair.
    ///
    /// If either write fails the error is logged and the session is left unset.
    pub fn set_session(&self, token: &str, user: &UserInfo) {
        let record = match serde_json::to_string(user) {
            Ok(record) => record,
            Err(e) => {
                error!("Failed to serialize user record: {e}");
                return;
            }
        };

        if let Err(e) = self.store.set(&self.keys.token_key, token) {
            error!("Failed to store access token: {e}");
            self.clear();
            return;
        }

        if let Err(e) = self.store.set(&self.keys.user_key, &record) {
            error!("Failed to store user record: {e}");
            self.clear();
        }
    }

    /// The stored token, or `None` when signed out or storage is unreadable.
    pub fn get_token(&self) -> Option<String> {
        match self.store.get(&self.keys.token_key) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                error!("Failed to read access token: {e}");
                None
            }
        }
    }

    /// The stored user, or `None` when absent or malformed.
    pub fn get_user(&self) -> Option<UserInfo> {
        let raw = match self.store.get(&self.keys.user_key) {
            Ok(raw) => raw?,
            Err(e) => {
                error!("Failed to read user record: {e}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("Failed to parse stored user: {e}");
                None
            }
        }
    }

    pub fn get_username(&self) -> Option<String> {
        self.get_user().map(|u| u.username)
    }

    /// Snapshot of the pair. The user is dropped when no token is stored.
    pub fn session(&self) -> Session {
        let token = self.get_token();
        let user = token.as_ref().and_then(|_| self.get_user());
        Session { token, user }
    }

    /// Remove both entries. Safe to call when already signed out.
    pub fn clear(&self) {
        for key in [&self.keys.token_key, &self.keys.user_key] {
            if let Err(e) = self.store.remove(key) {
                error!("Failed to remove `{key}` from storage: {e}");
            }
        }
    }

    /// Whether a token is stored. Says nothing about the token's validity.
    pub fn is_authenticated(&self) -> bool {
        self.get_token().is_some()
    }
}
