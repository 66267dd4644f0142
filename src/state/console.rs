// Console tab state management.
// Activity log fed by telemetry, with an unread counter and error tracking.

use chrono::{DateTime, Utc};
use ratatui::widgets::ListState;
use std::collections::VecDeque;
use std::time::Instant;

use crate::telemetry::{Level, Reason, Telemetry};

/// Oldest messages are dropped past this many.
const MAX_MESSAGES: usize = 500;

/// A console message for the activity log.
#[derive(Debug, Clone)]
pub struct ConsoleMessage {
    pub level: Level,
    pub reason: Option<Reason>,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ConsoleMessage {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Level::Info, None, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(Level::Warn, None, message)
    }

    fn new(level: Level, reason: Option<Reason>, message: impl Into<String>) -> Self {
        Self {
            level,
            reason,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Tracks recent errors to flag bursts.
#[derive(Debug, Default)]
pub struct ErrorTracker {
    /// Timestamps of recent errors (rolling window).
    errors: VecDeque<Instant>,
}

impl ErrorTracker {
    const WINDOW_SECS: u64 = 60;
    const THRESHOLD: usize = 5;

    /// Record an error. Returns true if threshold exceeded.
    pub fn record_error(&mut self) -> bool {
        let now = Instant::now();
        self.errors.push_back(now);
        self.prune_old();
        self.errors.len() >= Self::THRESHOLD
    }

    /// Remove errors outside the 1-minute window.
    fn prune_old(&mut self) {
        let cutoff = Instant::now()
            .checked_sub(std::time::Duration::from_secs(Self::WINDOW_SECS))
            .unwrap_or_else(Instant::now);
        while self.errors.front().is_some_and(|&t| t < cutoff) {
            self.errors.pop_front();
        }
    }
}

/// Complete state for the Console tab.
#[derive(Debug, Default)]
pub struct ConsoleState {
    /// Console messages, oldest first.
    pub messages: VecDeque<ConsoleMessage>,
    /// Messages logged since the tab was last viewed.
    pub unread: usize,
    /// Set once errors arrive faster than the tracker threshold.
    pub error_burst: bool,
    pub error_tracker: ErrorTracker,
    /// List state for message scrolling.
    pub list_state: ListState,
}

impl ConsoleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ConsoleMessage) {
        if message.level == Level::Error && self.error_tracker.record_error() {
            self.error_burst = true;
        }
        if message.level != Level::Info {
            self.unread += 1;
        }
        self.messages.push_back(message);
        while self.messages.len() > MAX_MESSAGES {
            self.messages.pop_front();
        }
    }

    pub fn log_info(&mut self, message: impl Into<String>) {
        self.push(ConsoleMessage::info(message));
    }

    pub fn log_warn(&mut self, message: impl Into<String>) {
        self.push(ConsoleMessage::warn(message));
    }

    /// Clear the unread badge (console tab opened).
    pub fn mark_read(&mut self) {
        self.unread = 0;
        self.error_burst = false;
    }

    /// Select previous message in list.
    pub fn select_prev(&mut self) {
        if self.messages.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Select next message in list.
    pub fn select_next(&mut self) {
        if self.messages.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(self.messages.len() - 1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }
}

impl Telemetry for ConsoleState {
    fn report(&mut self, level: Level, reason: Reason, context: &str) {
        self.push(ConsoleMessage::new(
            level,
            Some(reason),
            context,
        ));
    }
}
