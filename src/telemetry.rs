// Observability seam for the cache and the contact form.
// Failures are reported here with a reason code instead of surfacing to the user.

use std::fmt;

/// Severity of a reported event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

/// Why an event was reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    CacheHit,
    CacheReadFailed,
    CacheWriteFailed,
    FetchFailed,
    RapidSubmission,
    InvalidEmail,
    TokenMismatch,
    SubmitFailed,
    Submitted,
}

impl Reason {
    pub fn code(&self) -> &'static str {
        match self {
            Reason::CacheHit => "cache_hit",
            Reason::CacheReadFailed => "cache_read_failed",
            Reason::CacheWriteFailed => "cache_write_failed",
            Reason::FetchFailed => "fetch_failed",
            Reason::RapidSubmission => "rapid_submission",
            Reason::InvalidEmail => "invalid_email",
            Reason::TokenMismatch => "token_mismatch",
            Reason::SubmitFailed => "submit_failed",
            Reason::Submitted => "submitted",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

pub trait Telemetry {
    fn report(&mut self, level: Level, reason: Reason, context: &str);
}

/// Holds events until the real sink is free to take them.
#[derive(Debug, Default)]
pub struct TelemetryBuffer {
    events: Vec<(Level, Reason, String)>,
}

impl TelemetryBuffer {
    /// Forward every held event, oldest first.
    pub fn replay(self, sink: &mut dyn Telemetry) {
        for (level, reason, context) in self.events {
            sink.report(level, reason, &context);
        }
    }
}

impl Telemetry for TelemetryBuffer {
    fn report(&mut self, level: Level, reason: Reason, context: &str) {
        self.events.push((level, reason, context.to_string()));
    }
}
