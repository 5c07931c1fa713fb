//! Wall-clock abstraction for stamping finalized records.
//!
//! Sessions take the capture time from a `Clock` so tests can pin it.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

/// Source of the current UTC time.
///
/// # Example
///
/// ```
/// use fieldtrace::traits::{Clock, MockClock};
///
/// let clock = MockClock::new();
/// let before = clock.now();
/// clock.advance_ms(1500);
/// assert_eq!((clock.now() - before).num_milliseconds(), 1500);
/// ```
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// System wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Mock clock with controllable time advancement.
///
/// Clones share the same underlying time.
#[derive(Debug, Clone)]
pub struct MockClock {
    current: Arc<Mutex<DateTime<Utc>>>,
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MockClock {
    /// Creates a new `MockClock` at the Unix epoch.
    pub fn new() -> Self {
        Self::with_initial(DateTime::<Utc>::UNIX_EPOCH)
    }

    /// Creates a new `MockClock` starting at the specified time.
    pub fn with_initial(at: DateTime<Utc>) -> Self {
        Self {
            current: Arc::new(Mutex::new(at)),
        }
    }

    /// Sets the current time to an absolute value.
    pub fn set(&self, at: DateTime<Utc>) {
        *self.lock() = at;
    }

    /// Advances the current time by the specified number of milliseconds.
    pub fn advance_ms(&self, ms: i64) {
        let mut current = self.lock();
        *current += Duration::milliseconds(ms);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        // A poisoned clock still holds a valid timestamp
        self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        *self.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_clock_initial_value() {
        let clock = MockClock::new();
        assert_eq!(clock.now(), DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn mock_clock_set() {
        let at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let clock = MockClock::new();
        clock.set(at);
        assert_eq!(clock.now(), at);
    }

    #[test]
    fn mock_clock_advance() {
        let clock = MockClock::new();
        clock.advance_ms(500);
        clock.advance_ms(500);
        assert_eq!(clock.now().timestamp_millis(), 1000);
    }

    #[test]
    fn mock_clock_clones_share_time() {
        let clock = MockClock::new();
        let other = clock.clone();
        clock.advance_ms(250);
        assert_eq!(other.now().timestamp_millis(), 250);
    }

    #[test]
    fn system_clock_is_monotonic_enough() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
