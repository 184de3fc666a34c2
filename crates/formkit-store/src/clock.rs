//! Time sources for submission timestamps.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, TimeDelta, Utc};

/// Supplies the current time to the store.
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;
}

/// The wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that starts at a fixed instant and advances by a fixed step on
/// every read. Useful for deterministic ordering in tests and demos.
///
/// # Examples
///
/// ```
/// use chrono::{TimeDelta, TimeZone, Utc};
/// use formkit_store::clock::{Clock, ManualClock};
///
/// let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let clock = ManualClock::new(start, TimeDelta::seconds(1));
/// assert_eq!(clock.now(), start);
/// assert_eq!(clock.now(), start + TimeDelta::seconds(1));
/// ```
#[derive(Debug)]
pub struct ManualClock {
    next_millis: AtomicI64,
    step_millis: i64,
}

impl ManualClock {
    /// Creates a clock whose first reading is `start`.
    pub fn new(start: DateTime<Utc>, step: TimeDelta) -> Self {
        Self {
            next_millis: AtomicI64::new(start.timestamp_millis()),
            step_millis: step.num_milliseconds(),
        }
    }

    /// Creates a clock that always reads `instant`.
    pub fn frozen(instant: DateTime<Utc>) -> Self {
        Self::new(instant, TimeDelta::zero())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let millis = self.next_millis.fetch_add(self.step_millis, Ordering::SeqCst);
        DateTime::from_timestamp_millis(millis).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_system_clock_moves_forward() {
        let a = SystemClock.now();
        let b = SystemClock.now();
        assert!(b >= a);
    }

    #[test]
    fn test_frozen_clock() {
        let instant = Utc.with_ymd_and_hms(2023, 5, 1, 12, 0, 0).unwrap();
        let clock = ManualClock::frozen(instant);
        assert_eq!(clock.now(), instant);
        assert_eq!(clock.now(), instant);
    }

    #[test]
    fn test_manual_clock_steps() {
        let start = Utc.with_ymd_and_hms(2023, 5, 1, 12, 0, 0).unwrap();
        let clock = ManualClock::new(start, TimeDelta::milliseconds(250));
        clock.now();
        clock.now();
        assert_eq!(clock.now(), start + TimeDelta::milliseconds(500));
    }
}
