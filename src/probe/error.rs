//! Error types for reachability probes.

use std::time::Duration;

use thiserror::Error;

/// Error type for HTTP operations.
///
/// Describes what went wrong at the transport level. The monitor treats
/// every variant the same way (as "offline"); the distinction exists for logs.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The client gave up waiting for the server.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Error type for a single reachability check.
///
/// A failed check is never surfaced to monitor callers: it is logged
/// and mapped to the offline state.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The HTTP request behind the probe failed.
    #[error("Reachability request failed: {0}")]
    Http(#[from] HttpError),

    /// The probe did not answer within its deadline.
    #[error("Reachability check timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// The probe could not run at all (platform service missing, etc.).
    #[error("Reachability probe unavailable: {message}")]
    Unavailable {
        /// Description of why the probe is unavailable.
        message: String,
    },
}

impl ProbeError {
    /// Creates an `Unavailable` error with the given message.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}
