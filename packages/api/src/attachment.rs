//! # Authorization attachment
//!
//! [`AuthAttachment`] is the request policy every outgoing call passes through.
//! It reads the [`SessionStore`] synchronously and, when a token is present,
//! returns a clone of the request carrying `Authorization: Bearer <token>`.
//! Without a token the original request is passed through as-is.
//!
//! The policy borrows the request, so the caller's value is never modified.
//! It can optionally be scoped to a URL prefix (the API base URL) so the
//! credential never leaks to third-party destinations.

use std::borrow::Cow;

use store::{KeyValueStore, SessionStore};
use tracing::debug;

use crate::request::ApiRequest;

/// A synchronous transformation applied to a request before it is sent.
pub trait RequestPolicy {
    fn apply<'a>(&self, request: &'a ApiRequest) -> Cow<'a, ApiRequest>;
}

/// Adds the session's bearer token to outgoing requests.
#[derive(Clone, Debug)]
pub struct AuthAttachment<S: KeyValueStore> {
    session: SessionStore<S>,
    scope: Option<String>,
}

impl<S: KeyValueStore> AuthAttachment<S> {
    /// Attach to every destination.
    pub fn new(session: SessionStore<S>) -> Self {
        Self {
            session,
            scope: None,
        }
    }

    /// Attach only to URLs starting with `prefix`.
    pub fn scoped_to(session: SessionStore<S>, prefix: impl Into<String>) -> Self {
        Self {
            session,
            scope: Some(prefix.into()),
        }
    }

    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    fn in_scope(&self, url: &str) -> bool {
        match &self.scope {
            Some(prefix) => url.starts_with(prefix.as_str()),
            None => true,
        }
    }
}

impl<S: KeyValueStore> RequestPolicy for AuthAttachment<S> {
    fn apply<'a>(&self, request: &'a ApiRequest) -> Cow<'a, ApiRequest> {
        if !self.in_scope(&request.url) {
            return Cow::Borrowed(request);
        }
        match self.session.get_token() {
            Some(token) => {
                debug!("Attaching bearer token to {} {}", request.method, request.url);
                let mut authorized = request.clone();
                authorized.set_header("Authorization", format!("Bearer {token}"));
                Cow::Owned(authorized)
            }
            None => Cow::Borrowed(request),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::{MemoryStore, UserInfo};

    fn signed_in(token: &str) -> SessionStore<MemoryStore> {
        let session = SessionStore::new(MemoryStore::new());
        session.set_session(
            token,
            &UserInfo {
                id: 1,
                email: "a@b.com".to_string(),
                username: "alice".to_string(),
            },
        );
        session
    }

    #[test]
    fn test_attaches_bearer_token_to_clone() {
        let attachment = AuthAttachment::new(signed_in("T1"));
        let request = ApiRequest::get("http://localhost:500/api/tasks/");

        let sent = attachment.apply(&request);

        assert!(matches!(sent, Cow::Owned(_)));
        assert_eq!(sent.header("Authorization"), Some("Bearer T1"));
        // Original untouched
        assert!(request.header("Authorization").is_none());
        assert_eq!(sent.url, request.url);
    }

    #[test]
    fn test_passes_through_without_token() {
        let attachment = AuthAttachment::new(SessionStore::new(MemoryStore::new()));
        let request = ApiRequest::get("http://localhost:500/api/tasks/");

        let sent = attachment.apply(&request);

        assert!(matches!(sent, Cow::Borrowed(_)));
        assert!(sent.header("Authorization").is_none());
    }

    #[test]
    fn test_scoped_attachment_skips_foreign_origin() {
        let attachment = AuthAttachment::scoped_to(signed_in("T1"), "http://localhost:500/api");

        let foreign = ApiRequest::get("https://cdn.example.com/font.woff");
        assert!(attachment.apply(&foreign).header("Authorization").is_none());

        let api = ApiRequest::delete("http://localhost:500/api/tasks/3");
        assert_eq!(attachment.apply(&api).header("Authorization"), Some("Bearer T1"));
    }

    #[test]
    fn test_replaces_stale_header() {
        let attachment = AuthAttachment::new(signed_in("fresh"));
        let request = ApiRequest::get("http://x/").with_header("Authorization", "Bearer stale");
        let sent = attachment.apply(&request);
        assert_eq!(sent.header("authorization"), Some("Bearer fresh"));
        assert_eq!(request.header("authorization"), Some("Bearer stale"));
    }

    #[test]
    fn test_follows_session_changes() {
        let session = signed_in("T1");
        let attachment = AuthAttachment::new(session.clone());
        let request = ApiRequest::get("http://x/");

        session.clear();
        assert!(attachment.apply(&request).header("Authorization").is_none());
    }
}
