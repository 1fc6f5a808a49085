use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};

/// Trait for wall-clock reads
///
/// Implementations must be cheap to call; the session manager reads the clock
/// on every `is_authenticated()` query.
pub trait Clock: Send + Sync {
    /// Get current system time (wall clock)
    fn system_time(&self) -> SystemTime;

    /// Get milliseconds since UNIX epoch
    ///
    /// Times before the epoch collapse to `0`; values past `i64::MAX` ms
    /// saturate.
    fn millis_since_epoch(&self) -> i64 {
        let millis =
            self.system_time().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        i64::try_from(millis).unwrap_or(i64::MAX)
    }

    /// Current time as a UTC timestamp
    fn now_utc(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from(self.system_time())
    }
}

/// Real system clock implementation
///
/// # Examples
///
/// ```
/// use oidc_session_common::time::{Clock, SystemClock};
///
/// let clock = SystemClock;
/// assert!(clock.millis_since_epoch() > 0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn system_time(&self) -> SystemTime {
        SystemTime::now()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    struct FixedClock(SystemTime);

    impl Clock for FixedClock {
        fn system_time(&self) -> SystemTime {
            self.0
        }
    }

    #[test]
    fn millis_since_epoch_uses_system_time() {
        let clock = FixedClock(UNIX_EPOCH + Duration::from_millis(1_700_000_000_123));
        assert_eq!(clock.millis_since_epoch(), 1_700_000_000_123);
    }

    #[test]
    fn times_before_epoch_collapse_to_zero() {
        let clock = FixedClock(UNIX_EPOCH - Duration::from_secs(10));
        assert_eq!(clock.millis_since_epoch(), 0);
    }

    #[test]
    fn now_utc_matches_millis() {
        let clock = FixedClock(UNIX_EPOCH + Duration::from_millis(86_400_000));
        assert_eq!(clock.now_utc().timestamp_millis(), 86_400_000);
    }

    #[test]
    fn system_clock_is_after_2020() {
        assert!(SystemClock.millis_since_epoch() > 1_577_836_800_000);
    }
}
