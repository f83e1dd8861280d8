//! Shared test fixtures for monitor tests.

use crate::probe::{ProbeError, ReachabilityProbe};
use crate::time::Clock;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

/// Probe that replays scripted results, then repeats `fallback`.
pub struct ScriptedProbe {
    results: Mutex<VecDeque<Result<bool, ProbeError>>>,
    fallback: bool,
    delay: Duration,
    yield_first: bool,
    calls: AtomicUsize,
}

impl ScriptedProbe {
    pub fn new(results: Vec<Result<bool, ProbeError>>, fallback: bool) -> Self {
        Self {
            results: Mutex::new(results.into()),
            fallback,
            delay: Duration::ZERO,
            yield_first: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Replays `values`, then keeps answering with the last one.
    pub fn returning(values: &[bool]) -> Self {
        let fallback = values.last().copied().unwrap_or(true);
        Self::new(values.iter().copied().map(Ok).collect(), fallback)
    }

    pub fn always(value: bool) -> Self {
        Self::new(vec![], value)
    }

    /// Fails every check.
    pub fn failing(times: usize) -> Self {
        Self::new(
            (0..times)
                .map(|_| Err(ProbeError::unavailable("network check failed")))
                .collect(),
            false,
        )
    }

    /// Sleeps for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Yields to the scheduler once before answering, so joined checks interleave.
    pub fn yielding(mut self) -> Self {
        self.yield_first = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ReachabilityProbe for ScriptedProbe {
    async fn check_connectivity(&self) -> Result<bool, ProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.yield_first {
            tokio::task::yield_now().await;
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let next = self.results.lock().unwrap().pop_front();
        next.unwrap_or(Ok(self.fallback))
    }
}

/// Clock returning a settable number of seconds since the epoch.
#[derive(Clone)]
pub struct MockClock {
    secs: Arc<AtomicU64>,
}

impl MockClock {
    pub fn new(initial_secs: u64) -> Self {
        Self {
            secs: Arc::new(AtomicU64::new(initial_secs)),
        }
    }

    pub fn advance(&self, secs: u64) {
        self.secs.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for MockClock {
    fn now(&self) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(self.secs.load(Ordering::SeqCst))
    }
}

/// Returns a shared log of received states and a listener appending to it.
pub fn recorder() -> (Arc<Mutex<Vec<bool>>>, impl Fn(bool) + Send + Sync + 'static) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    (calls, move |online: bool| sink.lock().unwrap().push(online))
}

/// Returns a copy of the recorded states.
pub fn recorded(calls: &Arc<Mutex<Vec<bool>>>) -> Vec<bool> {
    calls.lock().unwrap().clone()
}
