//! Authentication context and hooks for the UI.

use std::time::Duration;

use api::UserInfo;
use dioxus::prelude::*;
use store::Session;
use tracing::{debug, info};

use crate::services::use_services;

const HEALTH_INTERVAL: Duration = Duration::from_secs(30);

/// Authentication state for the application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<UserInfo>,
    /// A token is stored. Says nothing about whether the server accepts it.
    pub authenticated: bool,
    /// Whether the server is reachable (last health check succeeded).
    pub online: bool,
}

impl AuthState {
    pub fn from_session(session: &Session, online: bool) -> Self {
        Self {
            user: session.user.clone(),
            authenticated: session.is_authenticated(),
            online,
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.display_name())
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Provider component that manages authentication state.
/// Must be rendered inside the [`Services`](crate::Services) context.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let services = use_services();
    let initial = services.session.session();
    let mut auth_state = use_signal(|| AuthState::from_session(&initial, false));

    // Periodic connectivity check
    use_future(move || {
        let services = services.clone();
        async move {
            loop {
                let online = match services.client.health().await {
                    Ok(healthy) => healthy,
                    Err(e) => {
                        debug!("Health check failed: {e}");
                        false
                    }
                };
                let next = AuthState::from_session(&services.session.session(), online);
                if *auth_state.peek() != next {
                    auth_state.set(next);
                }

                #[cfg(target_arch = "wasm32")]
                gloo_timers::future::sleep(HEALTH_INTERVAL).await;
                #[cfg(not(target_arch = "wasm32"))]
                tokio::time::sleep(HEALTH_INTERVAL).await;
            }
        }
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let services = use_services();
    let mut auth_state = use_auth();
    let nav = use_navigator();

    let onclick = move |_| {
        services.client.logout();
        let online = auth_state.peek().online;
        auth_state.set(AuthState {
            online,
            ..AuthState::default()
        });
        info!("Signed out, returning to {}", services.config.routes.login);
        nav.replace(services.config.routes.login.clone());
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_session() {
        let session = Session {
            token: Some("T1".to_string()),
            user: Some(UserInfo {
                id: 7,
                email: "a@b.com".to_string(),
                username: "alice".to_string(),
            }),
        };
        let state = AuthState::from_session(&session, true);
        assert!(state.authenticated);
        assert_eq!(state.username(), Some("alice"));

        let signed_out = AuthState::from_session(&Session::default(), true);
        assert!(!signed_out.authenticated);
        assert!(signed_out.username().is_none());
    }
}
