//! reqwest-backed implementation of the network capability.

use async_trait::async_trait;
use calio_core::{AppConfig, Error};
use reqwest::Client;

use crate::http::{WorkerRequest, WorkerResponse};
use crate::platform::Network;

/// HTTP network gateway.
///
/// Wraps a reqwest client configured from [`AppConfig`]: user agent,
/// request timeout, rustls TLS, and transparent decompression.
pub struct HttpNetwork {
    http: Client,
    max_bytes: usize,
}

impl HttpNetwork {
    /// Build a gateway from the worker configuration.
    pub fn new(config: &AppConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout())
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, max_bytes: config.max_bytes })
    }
}

#[async_trait]
impl Network for HttpNetwork {
    async fn fetch(&self, request: &WorkerRequest) -> Result<WorkerResponse, Error> {
        let response = self
            .http
            .request(request.method.clone(), request.url.clone())
            .send()
            .await
            .map_err(|e| Error::Network(format!("network error: {}", e)))?;

        let status = response.status();
        let headers = response.headers().clone();

        if let Some(len) = response.content_length()
            && len as usize > self.max_bytes
        {
            return Err(Error::FetchTooLarge(format!("{} bytes exceeds {}", len, self.max_bytes)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Network(format!("failed to read response: {}", e)))?;

        if bytes.len() > self.max_bytes {
            return Err(Error::FetchTooLarge(format!("{} bytes exceeds {}", bytes.len(), self.max_bytes)));
        }

        tracing::debug!(url = %request.url, status = status.as_u16(), bytes = bytes.len(), "fetched");

        Ok(WorkerResponse::new(status, headers, bytes))
    }
}
