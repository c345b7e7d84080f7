//! Request and response bodies of the task API.

use serde::{Deserialize, Serialize};
use store::{Task, UserInfo};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Body of endpoints that only acknowledge (`register`, `delete`, ...).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
}

/// Response of `POST /tasks/`.
///
/// The reference backend only returns `{id, message}`. A backend that returns
/// the full record fills the optional fields too, see [`CreatedTask::into_task`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreatedTask {
    pub id: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

impl CreatedTask {
    /// The full record, if the server sent one.
    pub fn into_task(self) -> Option<Task> {
        Some(Task {
            id: self.id,
            title: self.title?,
            description: self.description.unwrap_or_default(),
            completed: self.completed?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionUpdate {
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetailsUpdate {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
}
