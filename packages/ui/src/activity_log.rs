//! In-app activity log. Also the [`Notifier`] the task list reports to.

use dioxus::prelude::*;

use crate::notice::{LogLevel, Notice, Notifier};

#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
}

#[derive(Clone, Debug, Default)]
pub struct ActivityLog {
    pub entries: Vec<LogEntry>,
    pub visible: bool,
    /// Entries before this index no longer raise the error banner.
    acknowledged: usize,
}

impl ActivityLog {
    pub fn push(&mut self, level: LogLevel, message: impl Into<String>) {
        self.entries.push(LogEntry {
            timestamp: current_time(),
            level,
            message: message.into(),
        });
    }

    /// The most recent unacknowledged error, shown as a banner above the task list.
    pub fn last_error(&self) -> Option<&LogEntry> {
        self.entries
            .get(self.acknowledged..)?
            .iter()
            .rev()
            .find(|e| e.level == LogLevel::Error)
    }

    /// Hide the banner until the next error arrives.
    pub fn acknowledge(&mut self) {
        self.acknowledged = self.entries.len();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.acknowledged = 0;
    }
}

pub fn use_activity_log() -> Signal<ActivityLog> {
    use_context::<Signal<ActivityLog>>()
}

impl Notifier for Signal<ActivityLog> {
    fn notify(&self, notice: Notice) {
        let mut log = *self;
        // Errors pop the panel open
        let visible = notice.level == LogLevel::Error;
        let mut state = log.write();
        state.push(notice.level, notice.message);
        state.visible |= visible;
    }
}

#[cfg(target_arch = "wasm32")]
fn current_time() -> String {
    let date = js_sys::Date::new_0();
    let h = date.get_hours();
    let m = date.get_minutes();
    let s = date.get_seconds();
    format!("{h:02}:{m:02}:{s:02}")
}

#[cfg(not(target_arch = "wasm32"))]
fn current_time() -> String {
    "00:00:00".to_string()
}
