//! Tests for `ReachabilityProbe` and `HttpProbe`.

use super::{
    HttpClient, HttpError, HttpProbe, HttpRequest, HttpResponse, ProbeError, ReachabilityProbe,
};
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Mock HTTP client returning a scripted sequence of results.
#[derive(Debug, Default)]
struct MockClient {
    responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockClient {
    fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn status(status: http::StatusCode) -> Self {
        Self::new(vec![Ok(HttpResponse::with_status(status))])
    }

    fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(req);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse::with_status(http::StatusCode::OK)))
    }
}

impl HttpClient for Arc<MockClient> {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).request(req).await
    }
}

/// Client that never answers.
struct HangingClient;

impl HttpClient for HangingClient {
    async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
        std::future::pending().await
    }
}

fn probe_url() -> url::Url {
    url::Url::parse("https://project.example.co/rest/v1/").unwrap()
}

mod http_probe {
    use super::*;

    #[test]
    fn new_uses_head_and_default_timeout() {
        let probe = HttpProbe::new(MockClient::default(), probe_url());

        assert_eq!(probe.method(), &http::Method::HEAD);
        assert_eq!(probe.timeout(), Duration::from_secs(5));
        assert_eq!(probe.url(), &probe_url());
    }

    #[test]
    fn builders_override_defaults() {
        let probe = HttpProbe::new(MockClient::default(), probe_url())
            .with_method(http::Method::GET)
            .with_timeout(Duration::from_millis(750));

        assert_eq!(probe.method(), &http::Method::GET);
        assert_eq!(probe.timeout(), Duration::from_millis(750));
    }

    #[tokio::test]
    async fn success_status_reports_online() {
        let probe = HttpProbe::new(MockClient::status(http::StatusCode::OK), probe_url());
        assert!(probe.check_connectivity().await.unwrap());
    }

    #[tokio::test]
    async fn server_error_reports_offline_without_error() {
        let probe = HttpProbe::new(
            MockClient::status(http::StatusCode::SERVICE_UNAVAILABLE),
            probe_url(),
        );
        assert!(!probe.check_connectivity().await.unwrap());
    }

    #[tokio::test]
    async fn unauthorized_reports_offline() {
        let probe = HttpProbe::new(
            MockClient::status(http::StatusCode::UNAUTHORIZED),
            probe_url(),
        );
        assert!(!probe.check_connectivity().await.unwrap());
    }

    #[tokio::test]
    async fn transport_error_is_returned() {
        let probe = HttpProbe::new(MockClient::new(vec![Err(HttpError::Timeout)]), probe_url());

        let result = probe.check_connectivity().await;

        assert!(matches!(result, Err(ProbeError::Http(HttpError::Timeout))));
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_client_times_out() {
        let probe =
            HttpProbe::new(HangingClient, probe_url()).with_timeout(Duration::from_secs(2));

        let result = probe.check_connectivity().await;

        match result {
            Err(ProbeError::Timeout(deadline)) => assert_eq!(deadline, Duration::from_secs(2)),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn request_carries_method_url_headers_and_timeout() {
        let client = Arc::new(MockClient::default());
        let mut headers = http::HeaderMap::new();
        headers.insert("apikey", http::HeaderValue::from_static("anon-key"));

        let probe = HttpProbe::new(Arc::clone(&client), probe_url())
            .with_headers(headers)
            .with_timeout(Duration::from_secs(3));

        probe.check_connectivity().await.unwrap();

        let requests = client.captured_requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.method, http::Method::HEAD);
        assert_eq!(request.url, probe_url());
        assert_eq!(request.headers.get("apikey").unwrap(), "anon-key");
        assert_eq!(request.timeout, Some(Duration::from_secs(3)));
    }
}

mod shared_probe {
    use super::*;

    struct CountingProbe {
        calls: AtomicUsize,
    }

    impl ReachabilityProbe for CountingProbe {
        async fn check_connectivity(&self) -> Result<bool, ProbeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(true)
        }
    }

    #[tokio::test]
    async fn arc_delegates_to_inner_probe() {
        let probe = Arc::new(CountingProbe {
            calls: AtomicUsize::new(0),
        });
        let shared = Arc::clone(&probe);

        assert!(shared.check_connectivity().await.unwrap());
        assert!(shared.check_connectivity().await.unwrap());

        assert_eq!(probe.calls.load(Ordering::SeqCst), 2);
    }
}
