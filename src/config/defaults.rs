//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default HTTP method for reachability requests.
pub const METHOD: &str = "HEAD";

/// Default polling interval in seconds.
pub const INTERVAL_SECS: u64 = 30;

/// Default per-check timeout in seconds.
pub const TIMEOUT_SECS: u64 = 5;

/// Default file name written by `netpulse init`.
pub const CONFIG_FILE: &str = "netpulse.toml";

/// Default polling interval as Duration.
#[must_use]
pub const fn interval() -> Duration {
    Duration::from_secs(INTERVAL_SECS)
}

/// Default per-check timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}
