//! Online/offline status indicator for the page header.

use dioxus::prelude::*;

use crate::auth::use_auth;

/// A small label that shows the current connectivity and auth status.
///
/// - **Signed in + online**: "Online"
/// - **Signed in + offline**: "Offline", changes will fail until the API is back
/// - **Signed out**: "Signed out"
#[component]
pub fn OnlineIndicator() -> Element {
    let auth = use_auth();
    let state = auth();

    match (state.authenticated, state.online) {
        (true, true) => rsx! {
            span {
                class: "online-indicator online-indicator--online",
                title: "Connected to the task server",
                "Online"
            }
        },
        (true, false) => rsx! {
            span {
                class: "online-indicator online-indicator--offline",
                title: "The task server is unreachable",
                "Offline"
            }
        },
        (false, _) => rsx! {
            span {
                class: "online-indicator online-indicator--anonymous",
                title: "Sign in to see your tasks",
                "Signed out"
            }
        },
    }
}
