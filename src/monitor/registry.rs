//! Shared monitor accessor.
//!
//! [`MonitorRegistry`] is an explicit context object: the application creates
//! one at startup and passes it to the components that need connectivity
//! awareness. It lazily builds a single [`ConnectivityMonitor`] and hands out
//! shared references to it until [`MonitorRegistry::reset`] is called.

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{ConnectivityMonitor, lock};
use crate::probe::{HttpClient, HttpProbe};
use crate::time::SystemClock;

type Factory<P, C> = Box<dyn Fn() -> ConnectivityMonitor<P, C> + Send + Sync>;

/// Hands out one shared [`ConnectivityMonitor`] per registry.
///
/// # Example
///
/// ```ignore
/// use netpulse::monitor::MonitorRegistry;
///
/// let registry = MonitorRegistry::with_http_probe(probe, interval);
/// let monitor = registry.get_instance();
/// monitor.start();
/// assert!(Arc::ptr_eq(&monitor, &registry.get_instance()));
///
/// registry.reset(); // stops the monitor and forgets it
/// ```
pub struct MonitorRegistry<P, C = SystemClock> {
    factory: Factory<P, C>,
    instance: Mutex<Option<Arc<ConnectivityMonitor<P, C>>>>,
}

impl<P, C> MonitorRegistry<P, C> {
    /// Creates an empty registry that builds monitors with `factory`.
    #[must_use]
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> ConnectivityMonitor<P, C> + Send + Sync + 'static,
    {
        Self {
            factory: Box::new(factory),
            instance: Mutex::new(None),
        }
    }

    /// Returns the shared monitor, creating it on first use.
    ///
    /// Repeated calls without an intervening [`reset`](Self::reset) return
    /// the same instance.
    #[must_use]
    pub fn get_instance(&self) -> Arc<ConnectivityMonitor<P, C>> {
        let mut instance = lock(&self.instance);
        let monitor = instance.get_or_insert_with(|| {
            tracing::debug!("Creating shared connectivity monitor");
            Arc::new((self.factory)())
        });
        Arc::clone(monitor)
    }

    /// Returns true if a shared monitor currently exists.
    #[must_use]
    pub fn has_instance(&self) -> bool {
        lock(&self.instance).is_some()
    }

    /// Stops and discards the shared monitor.
    ///
    /// The next [`get_instance`](Self::get_instance) builds a fresh one.
    /// Does nothing when no monitor exists.
    pub fn reset(&self) {
        let Some(monitor) = lock(&self.instance).take() else {
            return;
        };

        if monitor.is_running() {
            monitor.stop();
        }
        tracing::debug!("Shared connectivity monitor reset");
    }
}

impl<H> MonitorRegistry<HttpProbe<H>, SystemClock>
where
    H: HttpClient + Clone + 'static,
{
    /// Creates a registry whose monitors use a copy of `probe`.
    ///
    /// # Panics
    ///
    /// The first [`get_instance`](Self::get_instance) panics if `interval` is zero.
    #[must_use]
    pub fn with_http_probe(probe: HttpProbe<H>, interval: Duration) -> Self {
        Self::new(move || ConnectivityMonitor::new(probe.clone(), interval))
    }
}

impl<P, C> fmt::Debug for MonitorRegistry<P, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonitorRegistry")
            .field("instance", &*lock(&self.instance))
            .finish_non_exhaustive()
    }
}
