//! # Scriptable transport for tests
//!
//! [`MockTransport`] records every request it receives and answers from a
//! per-route queue of scripted replies. A reply can be immediate or deferred:
//! [`MockTransport::defer`] hands back a [`PendingReply`] that settles the
//! request whenever the test decides, which is how overlapping in-flight
//! requests are exercised.
//!
//! Routes match on method plus URL suffix, e.g. `(GET, "/tasks/")`.
//! A request with no scripted reply fails with [`ApiError::Transport`].

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use reqwest::Method;
use serde_json::Value;
use tokio::sync::oneshot;

use crate::error::ApiError;
use crate::request::{ApiRequest, ApiResponse};
use crate::transport::Transport;

type Outcome = Result<ApiResponse, ApiError>;

enum Reply {
    Ready(Outcome),
    Deferred(oneshot::Receiver<Outcome>),
}

#[derive(Default)]
struct MockState {
    replies: HashMap<(Method, String), VecDeque<Reply>>,
    requests: Vec<ApiRequest>,
}

/// In-memory Transport with scripted replies. Clones share the script.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

/// Settles one deferred request.
pub struct PendingReply {
    sender: oneshot::Sender<Outcome>,
}

impl PendingReply {
    pub fn respond(self, response: ApiResponse) {
        let _ = self.sender.send(Ok(response));
    }

    pub fn respond_json(self, status: u16, body: Value) {
        self.respond(ApiResponse::json(status, &body));
    }

    pub fn fail(self, error: ApiError) {
        let _ = self.sender.send(Err(error));
    }
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, method: Method, path: &str, reply: Reply) {
        self.state
            .lock()
            .unwrap()
            .replies
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
    }

    /// Queue an immediate response.
    pub fn reply(&self, method: Method, path: &str, response: ApiResponse) {
        self.push(method, path, Reply::Ready(Ok(response)));
    }

    pub fn reply_json(&self, method: Method, path: &str, status: u16, body: Value) {
        self.reply(method, path, ApiResponse::json(status, &body));
    }

    /// Queue an immediate transport failure.
    pub fn fail(&self, method: Method, path: &str, error: ApiError) {
        self.push(method, path, Reply::Ready(Err(error)));
    }

    /// Queue a reply the test settles later.
    pub fn defer(&self, method: Method, path: &str) -> PendingReply {
        let (sender, receiver) = oneshot::channel();
        self.push(method, path, Reply::Deferred(receiver));
        PendingReply { sender }
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    /// Requests received for one route.
    pub fn requests_to(&self, method: Method, path: &str) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.url.ends_with(path))
            .collect()
    }

    fn take_reply(&self, request: &ApiRequest) -> Option<Reply> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());

        let key = state
            .replies
            .iter()
            .filter(|((method, path), queue)| {
                *method == request.method && request.url.ends_with(path.as_str()) && !queue.is_empty()
            })
            .map(|(key, _)| key.clone())
            .max_by_key(|(_, path)| path.len())?;
        state.replies.get_mut(&key)?.pop_front()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        match self.take_reply(&request) {
            Some(Reply::Ready(outcome)) => outcome,
            Some(Reply::Deferred(receiver)) => receiver
                .await
                .unwrap_or_else(|_| Err(ApiError::Transport("request cancelled".to_string()))),
            None => Err(ApiError::Transport(format!(
                "no reply scripted for {} {}",
                request.method, request.url
            ))),
        }
    }
}
