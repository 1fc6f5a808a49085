//! Time mocking for deterministic expiry tests
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//!
//! use oidc_session_common::testing::MockClock;
//! use oidc_session_common::time::Clock;
//!
//! let clock = MockClock::at_millis(1_000);
//! clock.advance(Duration::from_secs(5));
//! assert_eq!(clock.millis_since_epoch(), 6_000);
//! ```

// Test utility: poisoned mutexes panic so the surrounding test fails early
#![allow(clippy::missing_panics_doc)]

use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::time::Clock;

/// Mock clock for deterministic testing
///
/// Clones share the same timeline, so a test can hand one clone to the code
/// under test and keep another to advance time.
#[derive(Debug, Clone)]
pub struct MockClock {
    current: Arc<Mutex<SystemTime>>,
}

impl MockClock {
    /// Create a mock clock frozen at the current real time
    pub fn new() -> Self {
        Self { current: Arc::new(Mutex::new(SystemTime::now())) }
    }

    /// Create a mock clock frozen at `millis` after the UNIX epoch
    pub fn at_millis(millis: u64) -> Self {
        Self { current: Arc::new(Mutex::new(UNIX_EPOCH + Duration::from_millis(millis))) }
    }

    /// Advance the mock clock by a duration
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current.lock().expect("mutex poisoned");
        *current += duration;
    }

    /// Advance the mock clock by a number of milliseconds
    pub fn advance_millis(&self, millis: u64) {
        self.advance(Duration::from_millis(millis));
    }

    /// Jump to an absolute time, expressed in milliseconds since the epoch
    pub fn set_millis(&self, millis: u64) {
        let mut current = self.current.lock().expect("mutex poisoned");
        *current = UNIX_EPOCH + Duration::from_millis(millis);
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn system_time(&self) -> SystemTime {
        *self.current.lock().expect("mutex poisoned")
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for testing::time.
    use super::*;

    #[test]
    fn clones_share_timeline() {
        let clock = MockClock::at_millis(10);
        let handle = clock.clone();

        handle.advance_millis(90);

        assert_eq!(clock.millis_since_epoch(), 100);
    }

    #[test]
    fn set_millis_replaces_current_time() {
        let clock = MockClock::at_millis(5_000);
        clock.set_millis(42);
        assert_eq!(clock.millis_since_epoch(), 42);
    }

    #[test]
    fn new_starts_near_real_time() {
        let clock = MockClock::new();
        let drift = (clock.millis_since_epoch() - crate::time::SystemClock.millis_since_epoch())
            .unsigned_abs();
        assert!(drift < 5_000);
    }
}
