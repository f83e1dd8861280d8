//! Monitor layer for tracking online/offline status.
//!
//! This module provides types and functions for:
//! - Tracking reachability and notifying transitions ([`ConnectivityMonitor`])
//! - Managing listener registrations ([`Subscription`], [`SubscriptionId`])
//! - Consuming transitions as an async stream ([`StatusStream`], [`StatusChange`])
//! - Sharing one monitor across an application ([`MonitorRegistry`])

mod connectivity;
mod listener;
mod registry;
mod status;
mod stream;

#[cfg(test)]
mod test_fixtures;

pub use connectivity::{ConnectivityMonitor, DEFAULT_CHECK_INTERVAL};
pub use listener::{StatusCallback, Subscription, SubscriptionId};
pub use registry::MonitorRegistry;
pub use status::{Status, StatusChange};
pub use stream::StatusStream;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Locks `mutex`, recovering the data if a previous holder panicked.
///
/// Listener panics are caught outside every lock, so poisoning would only
/// come from a bug in this module; the guarded state stays consistent.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
