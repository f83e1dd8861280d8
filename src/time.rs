//! Time abstraction for testability.
//!
//! Transition events carry a wall-clock timestamp. The [`Clock`] trait lets
//! tests pin that timestamp while production code reads the system clock.

use std::time::{SystemTime, UNIX_EPOCH};

/// Source of wall-clock time for transition timestamps.
///
/// # Example
///
/// ```
/// use netpulse::time::{Clock, SystemClock};
///
/// let clock = SystemClock;
/// assert!(clock.now() >= std::time::SystemTime::UNIX_EPOCH);
/// ```
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> SystemTime;
}

/// Production clock delegating to [`SystemTime::now()`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Converts a timestamp to whole seconds since the Unix epoch.
///
/// Pre-epoch timestamps map to 0.
#[must_use]
pub fn unix_seconds(timestamp: SystemTime) -> u64 {
    timestamp
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}
