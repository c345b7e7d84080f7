//! # Client configuration — `client.toml`
//!
//! Defines the TOML configuration the browser shell is built with (filename:
//! [`ClientConfig::filename`] = `"client.toml"`). It tells the client where the
//! task API lives, which storage keys hold the session and where the route gate
//! sends unauthenticated users.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:500/api"
//! scope_authorization = true      # only attach the bearer token to base_url
//!
//! [storage]
//! token_key = "access_token"
//! user_key = "current_user"
//!
//! [routes]
//! login = "/login"
//! redirect_param = "redirectTo"
//! home = "/tasks"
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`ClientConfig`] | Top-level config. Builder helpers, TOML (de)serialisation and the canonical filename. |
//! | [`ApiConfig`] | Remote API location and authorization scoping. |
//! | [`StorageConfig`] | Key names of the persisted session entries. |
//! | [`RoutesConfig`] | Login entry point, the query parameter carrying the intended destination, and the default protected route. |
//!
//! Every field has a default so a missing or empty file is equivalent to the
//! default configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `client.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub routes: RoutesConfig,
}

/// Remote API configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Prefix every API path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Attach the bearer token only to requests under `base_url`.
    #[serde(default = "default_true")]
    pub scope_authorization: bool,
}

/// Storage key configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_token_key")]
    pub token_key: String,
    #[serde(default = "default_user_key")]
    pub user_key: String,
}

/// Route gate configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoutesConfig {
    #[serde(default = "default_login_route")]
    pub login: String,
    #[serde(default = "default_redirect_param")]
    pub redirect_param: String,
    /// Where a successful login lands when no destination was preserved.
    #[serde(default = "default_home_route")]
    pub home: String,
}

fn default_base_url() -> String {
    "http://localhost:500/api".to_string()
}

fn default_true() -> bool {
    true
}

fn default_token_key() -> String {
    "access_token".to_string()
}

fn default_user_key() -> String {
    "current_user".to_string()
}

fn default_login_route() -> String {
    "/login".to_string()
}

fn default_redirect_param() -> String {
    "redirectTo".to_string()
}

fn default_home_route() -> String {
    "/tasks".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            scope_authorization: default_true(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            token_key: default_token_key(),
            user_key: default_user_key(),
        }
    }
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            login: default_login_route(),
            redirect_param: default_redirect_param(),
            home: default_home_route(),
        }
    }
}

impl ClientConfig {
    /// Create a config pointing at the given API base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.into(),
                ..ApiConfig::default()
            },
            ..Self::default()
        }
    }

    /// Builder method to attach the bearer token to every destination.
    pub fn with_unscoped_authorization(mut self) -> Self {
        self.api.scope_authorization = false;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "client.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
