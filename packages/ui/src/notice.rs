//! Collaborators the task list talks to besides the API: somewhere to show
//! user-visible notices, and someone to confirm destructive actions.

use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    /// Modifier class used when rendering a notice of this level.
    pub fn class(&self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Success => "success",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }
}

/// A message meant for the user.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub level: LogLevel,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: LogLevel::Error,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: LogLevel::Success,
            message: message.into(),
        }
    }
}

/// Shows notices to the user.
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

impl<N: Notifier + ?Sized> Notifier for Rc<N> {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice)
    }
}

/// Asks the user to confirm an action.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

/// `window.confirm` on the web. Native builds have no modal dialog and
/// confirm automatically.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserConfirm;

impl Confirm for BrowserConfirm {
    fn confirm(&self, message: &str) -> bool {
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::window()
                .and_then(|window| window.confirm_with_message(message).ok())
                .unwrap_or(false)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            tracing::debug!("Auto-confirming: {message}");
            true
        }
    }
}
