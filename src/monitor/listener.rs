//! Registry of status-change callbacks.
//!
//! Callbacks are keyed by a [`SubscriptionId`] rather than compared by
//! identity, so registering the same closure twice yields two independent
//! registrations, each removable through its own [`Subscription`].

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, Weak};

use super::lock;

/// A status-change callback. Receives `true` when going online.
pub type StatusCallback = dyn Fn(bool) + Send + Sync;

/// Stable identifier of one listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Ordered set of registered callbacks.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    entries: Mutex<Entries>,
}

#[derive(Default)]
struct Entries {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Arc<StatusCallback>)>,
}

impl ListenerRegistry {
    /// Appends `callback` and returns the token that removes it.
    pub(crate) fn register(self: &Arc<Self>, callback: Arc<StatusCallback>) -> Subscription {
        let mut entries = lock(&self.entries);
        let id = SubscriptionId(entries.next_id);
        entries.next_id += 1;
        entries.listeners.push((id, callback));

        Subscription {
            id,
            registry: Arc::downgrade(self),
        }
    }

    /// Removes the registration with `id`. Returns false if it was already gone.
    pub(crate) fn remove(&self, id: SubscriptionId) -> bool {
        let mut entries = lock(&self.entries);
        let before = entries.listeners.len();
        entries.listeners.retain(|(entry, _)| *entry != id);
        entries.listeners.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        lock(&self.entries).listeners.len()
    }

    /// Invokes every listener registered at call time, in registration order.
    ///
    /// Dispatch runs on a snapshot with the lock released, so callbacks may
    /// register or unsubscribe without deadlocking; such changes take effect
    /// from the next notification. A panicking callback is logged and skipped.
    pub(crate) fn notify(&self, online: bool) {
        let snapshot: Vec<Arc<StatusCallback>> = lock(&self.entries)
            .listeners
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();

        for callback in snapshot {
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| callback(online))) {
                tracing::error!(
                    "Error in connectivity status change callback: {}",
                    panic_message(payload.as_ref())
                );
            }
        }
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.len())
            .finish()
    }
}

/// Extracts the message of a panic payload, if it carried one.
fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

/// Handle to one listener registration.
///
/// Dropping the handle keeps the listener registered; call
/// [`Subscription::unsubscribe`] to remove it.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    registry: Weak<ListenerRegistry>,
}

impl Subscription {
    /// Returns the identifier of this registration.
    #[must_use]
    pub const fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Removes exactly this registration.
    ///
    /// Returns false when there was nothing to remove (the monitor is gone).
    pub fn unsubscribe(self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.remove(self.id))
    }
}
