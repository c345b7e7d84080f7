//! # Task API client
//!
//! [`ApiClient`] implements every call of the remote contract on top of a
//! [`Transport`]. Each request is built as an [`ApiRequest`], passed through
//! the [`AuthAttachment`], sent, and its status checked before decoding.
//!
//! | Method | Call |
//! |--------|------|
//! | [`login`](ApiClient::login) | `POST /auth/login`, stores the session on success |
//! | [`register`](ApiClient::register) | `POST /auth/register`, no session side effect |
//! | [`logout`](ApiClient::logout) | clears the session, no network call |
//! | [`list_tasks`](ApiClient::list_tasks) | `GET /tasks/` |
//! | [`create_task`](ApiClient::create_task) | `POST /tasks/` |
//! | [`update_completion`](ApiClient::update_completion) | `PUT /tasks/{id}` with `{completed}` |
//! | [`update_details`](ApiClient::update_details) | `PUT /tasks/{id}` with `{title, description}` |
//! | [`delete_task`](ApiClient::delete_task) | `DELETE /tasks/{id}` |
//! | [`health`](ApiClient::health) | `GET /health` |

use store::{ApiConfig, KeyValueStore, SessionStore, Task, UserInfo};
use tracing::{debug, info};

use crate::attachment::{AuthAttachment, RequestPolicy};
use crate::error::ApiError;
use crate::models::*;
use crate::request::{ApiRequest, ApiResponse};
use crate::transport::Transport;

/// Client for the task API.
#[derive(Clone)]
pub struct ApiClient<T: Transport, S: KeyValueStore> {
    transport: T,
    attachment: AuthAttachment<S>,
    base_url: String,
}

impl<T: Transport, S: KeyValueStore> ApiClient<T, S> {
    pub fn new(transport: T, session: SessionStore<S>, config: &ApiConfig) -> Self {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let attachment = if config.scope_authorization {
            AuthAttachment::scoped_to(session, base_url.clone())
        } else {
            AuthAttachment::new(session)
        };
        Self {
            transport,
            attachment,
            base_url,
        }
    }

    pub fn session(&self) -> &SessionStore<S> {
        self.attachment.session()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn task_url(&self, id: i64) -> String {
        self.url(&format!("/tasks/{id}"))
    }

    /// Authorize, send and check the status of one request.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let authorized = self.attachment.apply(&request).into_owned();
        let response = self.transport.send(authorized).await?;
        debug!(
            "{} {} -> {}",
            request.method, request.url, response.status
        );
        response.error_for_status()
    }

    /// Log in with email and password and persist the returned session.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserInfo, ApiError> {
        let request = ApiRequest::post(self.url("/auth/login")).json(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })?;
        let response: LoginResponse = self.send(request).await?.decode()?;

        self.session()
            .set_session(&response.access_token, &response.user);
        info!("Logged in as {}", response.user.username);
        Ok(response.user)
    }

    /// Create an account. The user still has to log in afterwards.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<MessageResponse, ApiError> {
        let request = ApiRequest::post(self.url("/auth/register")).json(&RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        })?;
        self.send(request).await?.decode()
    }

    /// Forget the stored session.
    pub fn logout(&self) {
        self.session().clear();
        info!("Logged out");
    }

    pub async fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let response = self.send(ApiRequest::get(self.url("/tasks/"))).await?;
        // The backend answers an empty list as `[]`, but tolerate `null`.
        let tasks: Option<Vec<Task>> = response.decode()?;
        Ok(tasks.unwrap_or_default())
    }

    pub async fn create_task(
        &self,
        title: &str,
        description: &str,
    ) -> Result<CreatedTask, ApiError> {
        let request = ApiRequest::post(self.url("/tasks/")).json(&NewTask {
            title: title.to_string(),
            description: description.to_string(),
        })?;
        self.send(request).await?.decode()
    }

    pub async fn update_completion(&self, id: i64, completed: bool) -> Result<(), ApiError> {
        let request = ApiRequest::put(self.task_url(id)).json(&CompletionUpdate { completed })?;
        self.send(request).await?;
        Ok(())
    }

    pub async fn update_details(
        &self,
        id: i64,
        title: &str,
        description: &str,
    ) -> Result<(), ApiError> {
        let request = ApiRequest::put(self.task_url(id)).json(&DetailsUpdate {
            title: title.to_string(),
            description: description.to_string(),
        })?;
        self.send(request).await?;
        Ok(())
    }

    pub async fn delete_task(&self, id: i64) -> Result<(), ApiError> {
        self.send(ApiRequest::delete(self.task_url(id))).await?;
        Ok(())
    }

    /// Whether the API answers its health check.
    pub async fn health(&self) -> Result<bool, ApiError> {
        let response: HealthResponse = self
            .send(ApiRequest::get(self.url("/health")))
            .await?
            .decode()?;
        Ok(response.status == "ok")
    }
}
