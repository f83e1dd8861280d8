//! Tests for the run module.

use super::*;
use netpulse::config::Cli;
use netpulse::monitor::Status;
use std::time::{Duration, UNIX_EPOCH};

fn config(args: &[&str]) -> ValidatedConfig {
    let mut full_args = vec!["netpulse", "--url", "https://example.com/health"];
    full_args.extend(args);
    ValidatedConfig::from_raw(&Cli::parse_from_iter(full_args), None).unwrap()
}

fn change_at(status: Status, secs: u64) -> StatusChange {
    StatusChange::new(status, UNIX_EPOCH + Duration::from_secs(secs))
}

mod run_error {
    use super::*;

    #[test]
    fn stream_terminated_displays_message() {
        let error = RunError::StreamTerminated;
        assert_eq!(error.to_string(), "Monitor stream terminated unexpectedly");
    }

    #[test]
    fn output_error_displays_source() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let error = RunError::from(io);
        assert!(error.to_string().contains("Failed to write status"));
        assert!(error.to_string().contains("pipe closed"));
    }

    #[test]
    fn debug_format_works() {
        let error = RunError::StreamTerminated;
        let debug_str = format!("{error:?}");
        assert!(debug_str.contains("StreamTerminated"));
    }
}

mod output_format {
    use super::*;

    #[test]
    fn json_line_has_expected_fields() {
        let line = format_change(&change_at(Status::Offline, 1_700_000_000), true).unwrap();

        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "online": false,
                "status": "offline",
                "timestamp": 1_700_000_000_u64,
            })
        );
    }

    #[test]
    fn json_line_is_single_line() {
        let line = format_change(&change_at(Status::Online, 5), true).unwrap();
        assert!(!line.contains('\n'));
        assert!(line.contains(r#""online":true"#));
    }

    #[test]
    fn plain_line_is_timestamp_and_status() {
        let line = format_change(&change_at(Status::Online, 42), false).unwrap();
        assert_eq!(line, "42 online");
    }

    #[test]
    fn record_from_change() {
        let record = ChangeRecord::from(&change_at(Status::Offline, 7));

        assert!(!record.online);
        assert_eq!(record.status, "offline");
        assert_eq!(record.timestamp, 7);
    }
}

mod create_probe {
    use super::*;
    use http::Method;

    #[test]
    fn creates_probe_with_url() {
        let probe = create_probe(&config(&[]));
        assert_eq!(probe.url().as_str(), "https://example.com/health");
    }

    #[test]
    fn creates_probe_with_default_method_and_timeout() {
        let probe = create_probe(&config(&[]));

        assert_eq!(probe.method(), &Method::HEAD);
        assert_eq!(probe.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn creates_probe_with_configured_values() {
        let probe = create_probe(&config(&["--method", "GET", "--timeout", "9"]));

        assert_eq!(probe.method(), &Method::GET);
        assert_eq!(probe.timeout(), Duration::from_secs(9));
    }
}

mod watch_loop {
    use super::*;

    #[tokio::test]
    async fn ended_stream_is_an_error() {
        let mut changes = tokio_stream::empty::<StatusChange>();

        let result = watch(&mut changes, true).await;

        assert!(matches!(result, Err(RunError::StreamTerminated)));
    }
}
