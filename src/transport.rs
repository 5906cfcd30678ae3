//! Blocking URL retrieval.
//!
//! Provides the [`Transport`] abstraction the downloader fetches through,
//! enabling dependency injection for testing, and [`HttpTransport`], the
//! `ureq`-backed implementation used in production.

use std::io::Read;
use std::time::Duration;
use url::Url;

/// Default network timeout for a single fetch.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default cap on the size of a fetched body (256 MiB).
pub const DEFAULT_MAX_BODY_BYTES: u64 = 256 * 1024 * 1024;

/// The outcome of a single fetch.
///
/// Ordinary network failures are reported here rather than as errors, so a
/// transport never fails a download by itself; the downloader decides what a
/// failed fetch means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    succeeded: bool,
    body: Vec<u8>,
    reason: String,
}

impl FetchResult {
    /// A successful fetch carrying `body`.
    #[must_use]
    pub fn success(body: impl Into<Vec<u8>>) -> Self {
        Self {
            succeeded: true,
            body: body.into(),
            reason: String::new(),
        }
    }

    /// A failed fetch with a human-readable reason.
    #[must_use]
    pub fn failure(reason: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            body: Vec::new(),
            reason: reason.into(),
        }
    }

    /// Return whether the fetch succeeded.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        self.succeeded
    }

    /// Return the raw response body. Empty for failed fetches.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Consume the result and return the raw body.
    #[must_use]
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    /// Return why the fetch failed. Empty for successful fetches.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Trait for fetching the raw bytes behind a URL.
///
/// # Examples
///
/// ```
/// use sigfetch::transport::{HttpTransport, Transport};
///
/// let transport = HttpTransport::default();
/// // Use transport.fetch(&url) in production
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait Transport: Send + Sync {
    /// Fetch `url`, blocking until the body has been read or the fetch failed.
    fn fetch(&self, url: &Url) -> FetchResult;
}

/// HTTP(S) transport using a shared `ureq` agent.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    agent: ureq::Agent,
    max_body_bytes: u64,
}

impl HttpTransport {
    /// Create a transport with the given global timeout and body-size cap.
    #[must_use]
    pub fn new(timeout: Duration, max_body_bytes: u64) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
            max_body_bytes,
        }
    }

    fn read_body(&self, url: &Url) -> Result<Vec<u8>, String> {
        let response = self
            .agent
            .get(url.as_str())
            .call()
            .map_err(|e| describe_ureq_error(&e))?;
        let mut body = response.into_body();
        let mut buffer = Vec::new();
        body.as_reader()
            .take(self.max_body_bytes.saturating_add(1))
            .read_to_end(&mut buffer)
            .map_err(|e| format!("failed to read body: {e}"))?;
        if u64::try_from(buffer.len()).unwrap_or(u64::MAX) > self.max_body_bytes {
            return Err(format!(
                "body exceeds the {} byte limit",
                self.max_body_bytes
            ));
        }
        Ok(buffer)
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT, DEFAULT_MAX_BODY_BYTES)
    }
}

impl Transport for HttpTransport {
    fn fetch(&self, url: &Url) -> FetchResult {
        match self.read_body(url) {
            Ok(body) => FetchResult::success(body),
            Err(reason) => FetchResult::failure(reason),
        }
    }
}

/// Describe a ureq error for a failed [`FetchResult`].
fn describe_ureq_error(err: &ureq::Error) -> String {
    match err {
        ureq::Error::StatusCode(404) => "not found (HTTP 404)".to_owned(),
        ureq::Error::StatusCode(code) => format!("HTTP status {code}"),
        other => other.to_string(),
    }
}
