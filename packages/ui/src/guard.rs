//! # Route gate
//!
//! [`RouteGate::guard`] is consulted before a protected view is entered. It is
//! a pure, synchronous decision over [`SessionStore::is_authenticated`]: allow,
//! or redirect to the login entry point carrying the requested target in a
//! query parameter (`/login?redirectTo=%2Ftasks`).
//!
//! [`redirect_target`] is the other half of that contract: the login flow uses
//! it to read the preserved destination back out of its own query string.

use store::{KeyValueStore, RoutesConfig, SessionStore};
use tracing::{debug, warn};
use url::form_urlencoded;

/// Outcome of a gate check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Redirect {
        /// Login entry point, e.g. `/login`.
        login: String,
        /// Query parameter name carrying `redirect_to`.
        param: String,
        /// The route that was originally requested.
        redirect_to: String,
    },
}

impl GateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GateDecision::Allow)
    }

    /// Where to navigate instead, or `None` when access is allowed.
    pub fn location(&self) -> Option<String> {
        match self {
            GateDecision::Allow => None,
            GateDecision::Redirect {
                login,
                param,
                redirect_to,
            } => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair(param, redirect_to)
                    .finish();
                Some(format!("{login}?{query}"))
            }
        }
    }
}

/// Access check for protected routes.
#[derive(Clone, Debug)]
pub struct RouteGate<S: KeyValueStore> {
    session: SessionStore<S>,
    routes: RoutesConfig,
}

impl<S: KeyValueStore> RouteGate<S> {
    pub fn new(session: SessionStore<S>, routes: RoutesConfig) -> Self {
        Self { session, routes }
    }

    pub fn guard(&self, target: &str) -> GateDecision {
        if self.session.is_authenticated() {
            return GateDecision::Allow;
        }
        debug!("Unauthenticated access to {target}, redirecting to login");
        GateDecision::Redirect {
            login: self.routes.login.clone(),
            param: self.routes.redirect_param.clone(),
            redirect_to: target.to_string(),
        }
    }

    /// Destination after a successful login: the preserved target from
    /// `query`, or the configured home route.
    pub fn after_login(&self, query: &str) -> String {
        redirect_target(query, &self.routes.redirect_param)
            .unwrap_or_else(|| self.routes.home.clone())
    }
}

/// Read the preserved destination out of a login query string.
///
/// Only same-origin absolute paths are returned; anything else (`//host`,
/// `https://...`, relative paths) is rejected so the parameter cannot be used
/// as an open redirect.
pub fn redirect_target(query: &str, param: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let target = form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == param)
        .map(|(_, value)| value.into_owned())?;

    let same_origin =
        target.starts_with('/') && !target.starts_with("//") && !target.contains('\\');
    if !same_origin {
        warn!("Ignoring redirect target {target:?}");
        return None;
    }
    Some(target)
}
