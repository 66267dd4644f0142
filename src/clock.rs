// Time source shared by the submission gate and the cache.
// Production uses the wall clock; tests drive a manual clock.

use std::time::Duration;

use chrono::{DateTime, Utc};

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Elapsed time between two instants, zero if `later` is before `earlier`.
pub fn elapsed_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> Duration {
    later
        .signed_duration_since(earlier)
        .to_std()
        .unwrap_or(Duration::ZERO)
}

#[cfg(test)]
pub mod testing {
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::Duration;

    use chrono::{DateTime, Utc};

    use super::Clock;

    /// Manually advanced clock. Clones share the same instant.
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        now: Rc<Cell<DateTime<Utc>>>,
    }

    impl ManualClock {
        pub fn new(start: DateTime<Utc>) -> Self {
            Self {
                now: Rc::new(Cell::new(start)),
            }
        }

        pub fn advance(&self, by: Duration) {
            let step = chrono::Duration::from_std(by).unwrap_or(chrono::Duration::MAX);
            self.now.set(self.now.get() + step);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            self.now.get()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ManualClock;
    use super::*;

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new(Utc::now());
        let other = clock.clone();
        let start = clock.now();

        other.advance(Duration::from_millis(250));

        assert_eq!(elapsed_between(start, clock.now()), Duration::from_millis(250));
    }

    #[test]
    fn test_elapsed_saturates_at_zero() {
        let now = Utc::now();
        let earlier = now - chrono::Duration::seconds(5);
        assert_eq!(elapsed_between(now, earlier), Duration::ZERO);
    }
}
