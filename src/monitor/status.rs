//! Connectivity status and transition event types.

use std::fmt;
use std::time::SystemTime;

/// Reachability state as seen by the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The backend answered the last check.
    Online,
    /// The last check failed or reported the backend unreachable.
    Offline,
}

impl Status {
    /// Returns true for [`Status::Online`].
    #[must_use]
    pub const fn is_online(self) -> bool {
        matches!(self, Self::Online)
    }

    /// Returns the lowercase label used in logs and CLI output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
        }
    }
}

impl From<bool> for Status {
    fn from(online: bool) -> Self {
        if online { Self::Online } else { Self::Offline }
    }
}

impl From<Status> for bool {
    fn from(status: Status) -> Self {
        status.is_online()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single observed transition, as yielded by [`super::StatusStream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    /// The state the monitor switched to.
    pub status: Status,
    /// When the transition was observed.
    pub timestamp: SystemTime,
}

impl StatusChange {
    /// Creates a transition event.
    #[must_use]
    pub const fn new(status: Status, timestamp: SystemTime) -> Self {
        Self { status, timestamp }
    }

    /// Returns true if this transition went online.
    #[must_use]
    pub const fn is_online(&self) -> bool {
        self.status.is_online()
    }
}
