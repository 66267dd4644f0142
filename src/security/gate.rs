// Cooldown gate for form submissions.
// Accepts at most one action per cooldown window; rejected attempts leave no trace.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::clock::{Clock, SystemClock, elapsed_between};
use crate::error::{FolioError, Result};

/// Enforces a minimum interval between accepted actions.
///
/// Advisory and single-threaded: callers own the gate and pass it by
/// reference, nothing is shared behind a lock.
#[derive(Debug)]
pub struct SubmissionGate<C: Clock = SystemClock> {
    cooldown: Duration,
    last_accepted_at: Option<DateTime<Utc>>,
    clock: C,
}

impl SubmissionGate<SystemClock> {
    pub fn with_system_clock(cooldown: Duration) -> Result<Self> {
        Self::new(cooldown, SystemClock)
    }
}

impl<C: Clock> SubmissionGate<C> {
    pub fn new(cooldown: Duration, clock: C) -> Result<Self> {
        if cooldown.is_zero() {
            return Err(FolioError::InvalidConfiguration(
                "submission cooldown must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            cooldown,
            last_accepted_at: None,
            clock,
        })
    }

    /// Accept the action if the cooldown has fully elapsed (inclusive).
    pub fn try_acquire(&mut self) -> bool {
        let now = self.clock.now();
        let ready = match self.last_accepted_at {
            None => true,
            Some(last) => elapsed_between(last, now) >= self.cooldown,
        };
        if ready {
            self.last_accepted_at = Some(now);
        }
        ready
    }

    /// Time left before the next call to `try_acquire` can succeed.
    pub fn remaining_cooldown(&self) -> Duration {
        match self.last_accepted_at {
            None => Duration::ZERO,
            Some(last) => self
                .cooldown
                .saturating_sub(elapsed_between(last, self.clock.now())),
        }
    }
}
