//! This crate contains the client logic and shared UI for the workspace.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`guard`] | [`RouteGate`], allow-or-redirect decisions for protected routes |
//! | [`task_list`] | [`TaskList`], the optimistic task list controller |
//! | [`notice`] | [`Notifier`] and [`Confirm`] seams |
//! | [`services`] | platform store selection and the [`Services`] context |

pub mod guard;
pub use guard::{redirect_target, GateDecision, RouteGate};

pub mod notice;
pub use notice::{BrowserConfirm, Confirm, LogLevel, Notice, Notifier};

pub mod task_list;
pub use task_list::{PendingEdit, SyncError, TaskList, TaskListState};

pub mod services;
pub use services::{
    make_platform_store, make_session_store, use_services, use_task_list, AppClient,
    AppTaskList, PlatformStore, Services,
};

mod auth;
pub use auth::{use_auth, AuthProvider, AuthState, LogoutButton};

mod online_indicator;
pub use online_indicator::OnlineIndicator;

pub mod activity_log;
pub use activity_log::{use_activity_log, ActivityLog, LogEntry};

mod activity_log_panel;
pub use activity_log_panel::{ErrorBanner, NoticePanel, NoticeToggle};
