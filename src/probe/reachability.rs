//! Reachability probe trait and the HTTP-based default probe.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use super::{HttpClient, HttpRequest, ProbeError};

/// Capability answering "can we currently reach the network".
///
/// The monitor only needs a boolean oracle; how the answer is obtained
/// (HTTP ping, platform API, test double) is up to the implementation.
///
/// # Errors
///
/// Implementations return [`ProbeError`] when the check itself could not be
/// completed. Callers should treat an error as "offline", never as "online".
///
/// # Example
///
/// ```ignore
/// use netpulse::probe::{ProbeError, ReachabilityProbe};
///
/// struct AlwaysOnline;
///
/// impl ReachabilityProbe for AlwaysOnline {
///     async fn check_connectivity(&self) -> Result<bool, ProbeError> {
///         Ok(true)
///     }
/// }
/// ```
pub trait ReachabilityProbe: Send + Sync {
    /// Performs one reachability check.
    fn check_connectivity(&self) -> impl Future<Output = Result<bool, ProbeError>> + Send;
}

impl<T: ReachabilityProbe> ReachabilityProbe for Arc<T> {
    fn check_connectivity(&self) -> impl Future<Output = Result<bool, ProbeError>> + Send {
        (**self).check_connectivity()
    }
}

/// Reachability probe that pings an HTTP endpoint.
///
/// Sends a request (HEAD by default) to the configured URL and reports
/// online when the server answers with a 2xx status. Any other status means
/// the backend is reachable but not serving, which is reported as offline.
/// Transport failures and the probe timeout are returned as errors.
///
/// # Example
///
/// ```
/// use netpulse::probe::{HttpProbe, ReqwestClient};
/// use std::time::Duration;
/// use url::Url;
///
/// let probe = HttpProbe::new(
///     ReqwestClient::new(),
///     Url::parse("https://api.example.com/health").unwrap(),
/// )
/// .with_timeout(Duration::from_secs(3));
///
/// assert_eq!(probe.timeout(), Duration::from_secs(3));
/// ```
#[derive(Debug, Clone)]
pub struct HttpProbe<H> {
    client: H,
    url: url::Url,
    method: http::Method,
    headers: http::HeaderMap,
    timeout: Duration,
}

impl<H> HttpProbe<H> {
    /// Default deadline for a single check (5 seconds).
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Creates a HEAD probe for `url` with the default timeout and no headers.
    #[must_use]
    pub fn new(client: H, url: url::Url) -> Self {
        Self {
            client,
            url,
            method: http::Method::HEAD,
            headers: http::HeaderMap::new(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn with_method(mut self, method: http::Method) -> Self {
        self.method = method;
        self
    }

    /// Sets the headers sent with every check (API keys, auth).
    #[must_use]
    pub fn with_headers(mut self, headers: http::HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the deadline for a single check.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the probed URL.
    #[must_use]
    pub const fn url(&self) -> &url::Url {
        &self.url
    }

    /// Returns the configured HTTP method.
    #[must_use]
    pub const fn method(&self) -> &http::Method {
        &self.method
    }

    /// Returns the configured timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    fn build_request(&self) -> HttpRequest {
        HttpRequest::new(self.method.clone(), self.url.clone())
            .with_headers(&self.headers)
            .with_timeout(self.timeout)
    }
}

impl<H: HttpClient> ReachabilityProbe for HttpProbe<H> {
    async fn check_connectivity(&self) -> Result<bool, ProbeError> {
        let request = self.build_request();

        // The client may not honour `HttpRequest::timeout`; bound the call here too.
        let response = tokio::time::timeout(self.timeout, self.client.request(request))
            .await
            .map_err(|_| ProbeError::Timeout(self.timeout))??;

        if !response.is_success() {
            tracing::debug!(
                "Reachability endpoint {} answered {}",
                self.url,
                response.status
            );
        }

        Ok(response.is_success())
    }
}
