//! # Domain models for users, sessions and tasks
//!
//! These types are shared by every crate in the workspace. They are
//! `Serialize + Deserialize` so the same structs travel over the wire to the
//! task API and into the browser's key-value storage.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`UserInfo`] | The identity returned by a successful login. Persisted next to the token. |
//! | [`Session`] | A read-only snapshot of the stored credential pair. |
//! | [`Task`] | One entry of the user's task list. The server assigns `id` and is the source of truth. |

use serde::{Deserialize, Deserializer, Serialize};

/// User identity returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub email: String,
    pub username: String,
}

impl UserInfo {
    /// Get display name, falling back to email if the username is blank.
    pub fn display_name(&self) -> &str {
        if self.username.trim().is_empty() {
            &self.email
        } else {
            &self.username
        }
    }
}

/// Snapshot of the current credential pair.
///
/// `user` is only ever populated when `token` is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserInfo>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// A task owned by the authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    /// May be empty. The backend stores `NULL` for tasks created without one.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// A freshly created, not yet completed task.
    pub fn new(id: i64, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            completed: false,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
