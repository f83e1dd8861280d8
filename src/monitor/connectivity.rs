//! Connectivity monitor.
//!
//! This module provides [`ConnectivityMonitor`], which keeps the last
//! confirmed online/offline state, refreshes it on a fixed interval and on
//! demand, and notifies listeners once per transition.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

use super::listener::{ListenerRegistry, Subscription};
use super::stream::StatusStream;
use super::{Status, StatusChange, lock};
use crate::probe::ReachabilityProbe;
use crate::time::{Clock, SystemClock};

/// Default polling interval (30 seconds).
pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(30);

/// Tracks whether the backend is reachable.
///
/// The monitor starts optimistic (online) and not polling. [`start`] begins
/// periodic checks, [`force_check`] runs one immediately. Every check asks the
/// [`ReachabilityProbe`]; a probe error counts as offline. Listeners
/// registered with [`on_status_change`] are called only when the state flips,
/// never for a check that confirms the current state.
///
/// # Type Parameters
///
/// * `P` - The [`ReachabilityProbe`] implementation
/// * `C` - The [`Clock`] used to timestamp [`StatusChange`] events (defaults to [`SystemClock`])
///
/// # Example
///
/// ```ignore
/// use netpulse::monitor::{ConnectivityMonitor, DEFAULT_CHECK_INTERVAL};
///
/// let monitor = ConnectivityMonitor::new(probe, DEFAULT_CHECK_INTERVAL);
/// let subscription = monitor.on_status_change(|online| {
///     println!("now {}", if online { "online" } else { "offline" });
/// });
/// monitor.start();
/// // ...
/// subscription.unsubscribe();
/// monitor.stop();
/// ```
///
/// [`start`]: ConnectivityMonitor::start
/// [`force_check`]: ConnectivityMonitor::force_check
/// [`on_status_change`]: ConnectivityMonitor::on_status_change
pub struct ConnectivityMonitor<P, C = SystemClock> {
    shared: Arc<Shared<P, C>>,
}

/// State shared between the monitor handle, its poll task and in-flight checks.
struct Shared<P, C> {
    probe: P,
    clock: C,
    interval: Duration,
    online: AtomicBool,
    /// Serializes compare-store-notify so a flip is reported exactly once.
    transition: Mutex<()>,
    listeners: Arc<ListenerRegistry>,
    poller: Mutex<Option<Poller>>,
    next_poller_id: AtomicU64,
}

/// The active poll task. `id` distinguishes it from tasks of earlier runs.
struct Poller {
    id: u64,
    task: JoinHandle<()>,
}

impl<P> ConnectivityMonitor<P, SystemClock> {
    /// Creates a stopped monitor using the system clock.
    ///
    /// # Panics
    ///
    /// Panics if `interval` is zero.
    #[must_use]
    pub fn new(probe: P, interval: Duration) -> Self {
        Self::with_clock(probe, SystemClock, interval)
    }
}

impl<P, C> ConnectivityMonitor<P, C> {
    /// Creates a stopped monitor with a custom clock.
    ///
    /// # Panics
    ///
    /// Panics if `interval` is zero.
    #[must_use]
    pub fn with_clock(probe: P, clock: C, interval: Duration) -> Self {
        assert!(!interval.is_zero(), "polling interval must be non-zero");

        Self {
            shared: Arc::new(Shared {
                probe,
                clock,
                interval,
                online: AtomicBool::new(true),
                transition: Mutex::new(()),
                listeners: Arc::new(ListenerRegistry::default()),
                poller: Mutex::new(None),
                next_poller_id: AtomicU64::new(0),
            }),
        }
    }

    /// Returns the last confirmed state. Never waits on a probe.
    #[must_use]
    pub fn is_online(&self) -> bool {
        self.shared.online.load(Ordering::SeqCst)
    }

    /// Returns the last confirmed state as a [`Status`].
    #[must_use]
    pub fn status(&self) -> Status {
        Status::from(self.is_online())
    }

    /// Returns true while periodic checks are scheduled.
    #[must_use]
    pub fn is_running(&self) -> bool {
        lock(&self.shared.poller).is_some()
    }

    /// Returns the polling interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.shared.interval
    }

    /// Returns the number of active listener registrations.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.shared.listeners.len()
    }

    /// Registers `callback` to be called with the new state on every transition.
    ///
    /// Listeners run synchronously, in registration order, on the task that
    /// observed the transition. A panicking listener is logged and does not
    /// prevent the others from running.
    pub fn on_status_change<F>(&self, callback: F) -> Subscription
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.shared.listeners.register(Arc::new(callback))
    }

    /// Cancels periodic checks.
    ///
    /// Listeners and the current state are kept. A check already in flight
    /// still completes and may still notify.
    pub fn stop(&self) {
        let Some(poller) = lock(&self.shared.poller).take() else {
            tracing::warn!("Connectivity monitor is not running");
            return;
        };

        poller.task.abort();
        tracing::debug!("Connectivity monitor stopped");
    }
}

impl<P, C> ConnectivityMonitor<P, C>
where
    P: ReachabilityProbe + 'static,
    C: Clock + 'static,
{
    /// Starts periodic checks: one immediately, then one per interval.
    ///
    /// Calling `start` on a running monitor logs a warning and does nothing.
    /// Must be called from within a Tokio runtime.
    pub fn start(&self) {
        let mut poller = lock(&self.shared.poller);
        if poller.is_some() {
            tracing::warn!("Connectivity monitor is already running");
            return;
        }

        let Ok(runtime) = Handle::try_current() else {
            tracing::error!("Connectivity monitor needs a Tokio runtime to start polling");
            return;
        };

        let id = self.shared.next_poller_id.fetch_add(1, Ordering::Relaxed);
        let task = runtime.spawn(poll_loop(Arc::clone(&self.shared), id));
        *poller = Some(Poller { id, task });

        tracing::debug!(
            "Connectivity monitor started (interval: {}s)",
            self.shared.interval.as_secs()
        );
    }

    /// Runs one check now, independent of the schedule.
    ///
    /// Never fails: a probe error is logged and recorded as offline.
    pub async fn force_check(&self) {
        self.shared.check().await;
    }
}

impl<P, C> ConnectivityMonitor<P, C>
where
    C: Clock + Clone + 'static,
{
    /// Returns a stream of timestamped transitions.
    ///
    /// The stream is backed by an ordinary listener; dropping it unsubscribes.
    /// It ends once the monitor itself is dropped.
    #[must_use]
    pub fn changes(&self) -> StatusStream {
        let (sender, receiver) = mpsc::unbounded_channel();
        let clock = self.shared.clock.clone();

        let subscription = self.on_status_change(move |online| {
            // A closed channel means the stream is being dropped and will unsubscribe.
            let _ = sender.send(StatusChange::new(Status::from(online), clock.now()));
        });

        StatusStream::new(receiver, subscription)
    }
}

impl<P, C> Drop for ConnectivityMonitor<P, C> {
    fn drop(&mut self) {
        if let Some(poller) = lock(&self.shared.poller).take() {
            poller.task.abort();
        }
    }
}

impl<P, C> fmt::Debug for ConnectivityMonitor<P, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectivityMonitor")
            .field("status", &self.status())
            .field("running", &self.is_running())
            .field("interval", &self.shared.interval)
            .field("listeners", &self.listener_count())
            .finish_non_exhaustive()
    }
}

impl<P: ReachabilityProbe, C> Shared<P, C> {
    async fn check(&self) {
        let online = match self.probe.check_connectivity().await {
            Ok(online) => online,
            Err(e) => {
                tracing::error!("Error checking connectivity: {e}");
                false
            }
        };

        self.apply(online);
    }
}

impl<P, C> Shared<P, C> {
    /// Records `online` and notifies listeners if it differs from the stored state.
    ///
    /// Returns true if a transition happened.
    fn apply(&self, online: bool) -> bool {
        let _transition = lock(&self.transition);

        let previous = self.online.swap(online, Ordering::SeqCst);
        if previous == online {
            return false;
        }

        tracing::info!(
            "Connectivity status changed: {} → {}",
            Status::from(previous),
            Status::from(online)
        );
        self.listeners.notify(online);
        true
    }
}

/// Fires a check every interval until the poller `id` is replaced or removed.
///
/// Each check runs as its own task, so a slow probe never delays later ticks.
async fn poll_loop<P, C>(shared: Arc<Shared<P, C>>, id: u64)
where
    P: ReachabilityProbe + 'static,
    C: Clock + 'static,
{
    let mut ticker = interval(shared.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;

        // Spawning under the poller lock guarantees no check starts after `stop` returns.
        {
            let poller = lock(&shared.poller);
            if !poller.as_ref().is_some_and(|p| p.id == id) {
                return;
            }

            let check = Arc::clone(&shared);
            tokio::spawn(async move { check.check().await });
        }
    }
}
