//! Layout wrapping every protected route. Runs the route gate before the
//! child view is rendered.

use dioxus::prelude::*;
use ui::{
    use_auth, use_services, LogoutButton, NoticePanel, NoticeToggle, OnlineIndicator,
};

use crate::Route;

#[component]
pub fn Protected() -> Element {
    let services = use_services();
    let auth = use_auth();
    let route = use_route::<Route>();
    let nav = use_navigator();

    // Subscribe so a sign-out re-runs the gate
    let state = auth();

    if let Some(location) = services.gate.guard(&route.to_string()).location() {
        nav.replace(location);
        return rsx! {};
    }

    let username = state.username().unwrap_or_default().to_string();

    rsx! {
        header {
            class: "app-header",
            h1 { "Tasks" }
            div {
                class: "app-header-actions",
                OnlineIndicator {}
                if !username.is_empty() {
                    span { class: "app-header-user", "{username}" }
                }
                NoticeToggle {}
                LogoutButton { class: "btn btn-secondary" }
            }
        }
        main {
            class: "app-main",
            Outlet::<Route> {}
        }
        NoticePanel {}
    }
}
