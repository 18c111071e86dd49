//! Wall-clock abstraction and elapsed-time formatting.
//!
//! Inspecting a request's last activity needs "now". The [`Clock`] trait
//! lets tests pin it:
//!
//! ```
//! use chrono::{Duration, TimeZone, Utc};
//! use queueview_core::time::{Clock, MockClock};
//!
//! let clock = MockClock::at(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
//! let start = clock.now();
//! clock.advance(Duration::seconds(90));
//! assert_eq!(clock.now() - start, Duration::seconds(90));
//! ```

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, Utc};

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the time elapsed since `since`.
    fn elapsed(&self, since: DateTime<Utc>) -> Duration {
        self.now() - since
    }
}

/// Clock backed by the system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A settable clock for tests.
#[derive(Debug)]
pub struct MockClock {
    /// Current time in milliseconds since the epoch.
    millis: AtomicI64,
}

impl MockClock {
    /// Creates a clock frozen at `now`.
    #[must_use]
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            millis: AtomicI64::new(now.timestamp_millis()),
        }
    }

    /// Advances the clock.
    pub fn advance(&self, duration: Duration) {
        self.millis
            .fetch_add(duration.num_milliseconds(), Ordering::SeqCst);
    }

    /// Moves the clock to `now`.
    pub fn set(&self, now: DateTime<Utc>) {
        self.millis.store(now.timestamp_millis(), Ordering::SeqCst);
    }
}

impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        let millis = self.millis.load(Ordering::SeqCst);
        DateTime::from_timestamp_millis(millis).unwrap_or_default()
    }
}

const UNITS: [(i64, char); 5] = [
    (7 * 24 * 3600, 'w'),
    (24 * 3600, 'd'),
    (3600, 'h'),
    (60, 'm'),
    (1, 's'),
];

/// Formats an interval as its two most significant non-zero units.
///
/// ```
/// use chrono::Duration;
/// use queueview_core::time::format_duration;
///
/// assert_eq!(format_duration(Duration::seconds(3900)), "1h5m");
/// assert_eq!(format_duration(Duration::seconds(42)), "42s");
/// assert_eq!(format_duration(Duration::milliseconds(300)), "0s");
/// ```
#[must_use]
pub fn format_duration(interval: Duration) -> String {
    let mut remaining = interval.num_seconds();
    if remaining <= 0 {
        return "0s".to_string();
    }

    let mut out = String::new();
    let mut terms = 0;
    for (unit, suffix) in UNITS {
        let count = remaining / unit;
        remaining %= unit;
        if count == 0 {
            continue;
        }
        out.push_str(&count.to_string());
        out.push(suffix);
        terms += 1;
        if terms == 2 {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_duration_units() {
        assert_eq!(format_duration(Duration::seconds(59)), "59s");
        assert_eq!(format_duration(Duration::seconds(60)), "1m");
        assert_eq!(format_duration(Duration::seconds(3661)), "1h1m");
        assert_eq!(format_duration(Duration::seconds(3605)), "1h5s");
        assert_eq!(format_duration(Duration::days(17)), "2w3d");
        assert_eq!(format_duration(Duration::days(1) + Duration::seconds(1)), "1d1s");
    }

    #[test]
    fn test_format_duration_non_positive() {
        assert_eq!(format_duration(Duration::zero()), "0s");
        assert_eq!(format_duration(Duration::seconds(-5)), "0s");
    }

    #[test]
    fn test_mock_clock_set_and_advance() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let clock = MockClock::at(start);
        assert_eq!(clock.now(), start);

        clock.advance(Duration::minutes(3));
        assert_eq!(clock.elapsed(start), Duration::minutes(3));

        clock.set(start);
        assert_eq!(clock.elapsed(start), Duration::zero());
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let clock = SystemClock;
        let before = clock.now();
        assert!(clock.now() >= before);
    }
}
