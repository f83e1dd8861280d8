//! Application execution logic.
//!
//! This module contains the async execution paths: a single check for
//! `--once`, and the watch loop that prints every connectivity transition
//! until shutdown.

use std::io::Write;
use std::time::SystemTime;

use serde::Serialize;
use thiserror::Error;
use tokio::signal;
use tokio_stream::StreamExt;

use netpulse::config::ValidatedConfig;
use netpulse::monitor::{ConnectivityMonitor, MonitorRegistry, StatusChange};
use netpulse::probe::{HttpProbe, ReqwestClient};
use netpulse::time::unix_seconds;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Unexpected stream termination.
    #[error("Monitor stream terminated unexpectedly")]
    StreamTerminated,

    /// Failed to encode a status line as JSON.
    #[error("Failed to encode status: {0}")]
    Encode(#[from] serde_json::Error),

    /// Failed to write a status line to stdout.
    #[error("Failed to write status: {0}")]
    Output(#[from] std::io::Error),
}

/// One status line in `--json` output.
#[derive(Debug, Serialize)]
struct ChangeRecord {
    online: bool,
    status: &'static str,
    timestamp: u64,
}

impl From<&StatusChange> for ChangeRecord {
    fn from(change: &StatusChange) -> Self {
        Self {
            online: change.is_online(),
            status: change.status.as_str(),
            timestamp: unix_seconds(change.timestamp),
        }
    }
}

/// Renders a status line, either as JSON or as `<unix secs> <status>`.
fn format_change(change: &StatusChange, json: bool) -> Result<String, RunError> {
    if json {
        return Ok(serde_json::to_string(&ChangeRecord::from(change))?);
    }

    Ok(format!(
        "{} {}",
        unix_seconds(change.timestamp),
        change.status
    ))
}

fn print_change(change: &StatusChange, json: bool) -> Result<(), RunError> {
    let line = format_change(change, json)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{line}")?;
    stdout.flush()?;
    Ok(())
}

/// Creates the HTTP reachability probe from configuration.
fn create_probe(config: &ValidatedConfig) -> HttpProbe<ReqwestClient> {
    HttpProbe::new(ReqwestClient::new(), config.url.clone())
        .with_method(config.method.clone())
        .with_headers(config.headers.clone())
        .with_timeout(config.timeout)
}

/// Runs one check and prints the resulting status.
///
/// # Errors
///
/// Returns an error if the status line cannot be written.
#[cfg(not(tarpaulin_include))]
pub async fn check_once(config: &ValidatedConfig) -> Result<StatusChange, RunError> {
    let monitor = ConnectivityMonitor::new(create_probe(config), config.interval);
    monitor.force_check().await;

    let change = StatusChange::new(monitor.status(), SystemTime::now());
    print_change(&change, config.json)?;
    Ok(change)
}

/// Executes the watch loop.
///
/// This function:
/// 1. Creates the shared monitor through a [`MonitorRegistry`]
/// 2. Subscribes to its transitions
/// 3. Starts periodic checks
/// 4. Prints every transition until shutdown signal (Ctrl+C / SIGTERM)
///
/// # Errors
///
/// Returns an error if:
/// - The monitor stream terminates unexpectedly
/// - A status line cannot be written
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires
/// a real network and signal handling.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let registry = MonitorRegistry::with_http_probe(create_probe(&config), config.interval);
    let monitor = registry.get_instance();

    let mut changes = monitor.changes();
    monitor.start();

    tracing::info!(
        "Monitoring {} (interval: {}s, timeout: {}s)",
        config.url,
        config.interval.as_secs(),
        config.timeout.as_secs()
    );

    let result = watch(&mut changes, config.json).await;

    drop(changes);
    registry.reset();
    result
}

/// Prints transitions until shutdown.
async fn watch<S>(changes: &mut S, json: bool) -> Result<(), RunError>
where
    S: tokio_stream::Stream<Item = StatusChange> + Unpin,
{
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;

            () = &mut shutdown => {
                tracing::info!("Shutdown signal received, stopping...");
                return Ok(());
            }

            change = changes.next() => {
                match change {
                    Some(change) => print_change(&change, json)?,
                    None => return Err(RunError::StreamTerminated),
                }
            }
        }
    }
}

/// Returns a future that completes when a shutdown signal is received.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
