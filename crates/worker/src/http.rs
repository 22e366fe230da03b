//! Request and response types flowing through the worker.
//!
//! ### Requests
//! A [`WorkerRequest`] is the worker's view of an intercepted request:
//! method, parsed URL, and whether it is a navigation. Only GET requests
//! are ever intercepted; other methods pass through to the network.
//!
//! ### Responses
//! A [`WorkerResponse`] owns its body bytes, so cloning one into the cache
//! never consumes the copy handed back to the requester. Conversions to
//! and from [`ResponseSnapshot`] carry status, headers, and body across
//! the storage boundary.

use bytes::Bytes;
use calio_core::ResponseSnapshot;
use reqwest::{
    Method, StatusCode,
    header::{self, HeaderMap, HeaderName, HeaderValue},
};
use url::Url;

/// Body returned when a navigation cannot be served from network or cache.
pub const OFFLINE_SHELL_BODY: &str = "Offline — CalIO is not cached yet. Please visit once with internet.";

/// An intercepted request.
#[derive(Debug, Clone)]
pub struct WorkerRequest {
    /// HTTP method.
    pub method: Method,
    /// Target URL.
    pub url: Url,
    /// Whether this request loads a document (navigation intent).
    pub navigation: bool,
}

impl WorkerRequest {
    /// A plain GET request.
    pub fn get(url: Url) -> Self {
        Self { method: Method::GET, url, navigation: false }
    }

    /// A navigation (document load) request.
    pub fn navigate(url: Url) -> Self {
        Self { method: Method::GET, url, navigation: true }
    }

    /// A request with an explicit method.
    pub fn new(method: Method, url: Url) -> Self {
        Self { method, url, navigation: false }
    }

    /// The target hostname, or empty for URLs without one.
    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or("")
    }
}

/// A response handed back to the requester.
#[derive(Debug, Clone)]
pub struct WorkerResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl WorkerResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self { status, headers, body }
    }

    /// Synthetic fallback for a cache-first miss with no network.
    pub fn offline() -> Self {
        Self { status: StatusCode::SERVICE_UNAVAILABLE, headers: HeaderMap::new(), body: Bytes::from_static(b"Offline") }
    }

    /// Synthetic fallback for a navigation with no network and no cached shell.
    pub fn shell_unavailable() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            headers,
            body: Bytes::from_static(OFFLINE_SHELL_BODY.as_bytes()),
        }
    }

    /// Synthetic empty fallback (network-only and revalidation misses).
    pub fn empty_unavailable() -> Self {
        Self { status: StatusCode::SERVICE_UNAVAILABLE, headers: HeaderMap::new(), body: Bytes::new() }
    }

    /// Whether the status is 2xx.
    pub fn is_ok(&self) -> bool {
        self.status.is_success()
    }

    /// Content-Type header value, if present and valid UTF-8.
    pub fn content_type(&self) -> Option<String> {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
    }

    /// Capture this response for storage under the given request URL.
    pub fn to_snapshot(&self, url: &str) -> ResponseSnapshot {
        let pairs: Vec<(String, String)> = self
            .headers
            .iter()
            .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.to_string(), v.to_string())))
            .collect();
        let headers_json = if pairs.is_empty() { None } else { serde_json::to_string(&pairs).ok() };

        ResponseSnapshot::capture(url, self.status.as_u16(), self.content_type(), headers_json, self.body.to_vec())
    }

    /// Rebuild a response from a stored snapshot.
    ///
    /// Header lines that fail to parse back are skipped; the separately
    /// stored content type is restored if the header did not survive.
    pub fn from_snapshot(snapshot: &ResponseSnapshot) -> Self {
        let status = StatusCode::from_u16(snapshot.status).unwrap_or(StatusCode::SERVICE_UNAVAILABLE);

        let mut headers = HeaderMap::new();
        if let Some(json) = &snapshot.headers_json
            && let Ok(pairs) = serde_json::from_str::<Vec<(String, String)>>(json)
        {
            for (name, value) in pairs {
                if let (Ok(name), Ok(value)) = (HeaderName::try_from(name.as_str()), HeaderValue::try_from(&value)) {
                    headers.append(name, value);
                }
            }
        }
        if !headers.contains_key(header::CONTENT_TYPE)
            && let Some(content_type) = &snapshot.content_type
            && let Ok(value) = HeaderValue::try_from(content_type)
        {
            headers.insert(header::CONTENT_TYPE, value);
        }

        Self { status, headers, body: Bytes::from(snapshot.body.clone()) }
    }
}
