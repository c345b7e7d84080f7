//! Rendering of the notices collected in the [`ActivityLog`](crate::ActivityLog).
//!
//! - [`ErrorBanner`] shows the latest unacknowledged error inline.
//! - [`NoticePanel`] lists every notice, newest first.
//! - [`NoticeToggle`] opens and closes the panel and counts notices.

use dioxus::prelude::*;

use crate::activity_log::{use_activity_log, LogEntry};
use crate::notice::LogLevel;

#[component]
pub fn ErrorBanner() -> Element {
    let mut log = use_activity_log();
    let Some(entry) = log().last_error().cloned() else {
        return rsx! {};
    };

    rsx! {
        div {
            class: "notice-banner",
            role: "alert",
            span { "{entry.message}" }
            button {
                class: "notice-banner-dismiss",
                title: "Dismiss",
                onclick: move |_| log.write().acknowledge(),
                "×"
            }
        }
    }
}

#[component]
fn NoticeRow(entry: LogEntry) -> Element {
    let level = entry.level.class();
    rsx! {
        li {
            class: "notice notice--{level}",
            time { class: "notice-time", "{entry.timestamp}" }
            span { class: "notice-message", "{entry.message}" }
        }
    }
}

#[component]
pub fn NoticePanel() -> Element {
    let mut log = use_activity_log();
    let state = log();
    if !state.visible {
        return rsx! {};
    }

    rsx! {
        aside {
            class: "notice-panel",
            header {
                class: "notice-panel-header",
                span { "Notices" }
                button { onclick: move |_| log.write().clear(), "Clear" }
                button { onclick: move |_| log.write().visible = false, "Close" }
            }
            if state.entries.is_empty() {
                p { class: "notice-panel-empty", "Nothing to report." }
            }
            ul {
                class: "notice-list",
                for (i, entry) in state.entries.iter().enumerate().rev() {
                    NoticeRow { key: "{i}", entry: entry.clone() }
                }
            }
        }
    }
}

#[component]
pub fn NoticeToggle() -> Element {
    let mut log = use_activity_log();
    let state = log();
    let errors = state
        .entries
        .iter()
        .filter(|e| e.level == LogLevel::Error)
        .count();
    let label = match (state.entries.len(), errors) {
        (0, _) => "Notices".to_string(),
        (n, 0) => format!("Notices ({n})"),
        (n, e) => format!("Notices ({n}, {e} failed)"),
    };

    rsx! {
        button {
            class: if errors > 0 { "notice-toggle has-errors" } else { "notice-toggle" },
            onclick: move |_| {
                let mut state = log.write();
                state.visible = !state.visible;
            },
            "{label}"
        }
    }
}
