//! The three caching strategies plus the network-only bypass.
//!
//! Each strategy produces a response for exactly one request and absorbs
//! its own failures: transport errors collapse into the fallback chain,
//! and cache read/write errors are logged and degrade to a miss. Nothing
//! here returns `Err` to the router.

use std::sync::Arc;

use calio_core::CacheDb;
use url::Url;

use crate::http::{WorkerRequest, WorkerResponse};
use crate::platform::Network;

/// Serve from cache if present; only consult the network on a miss.
///
/// Used for content that is immutable once published (font binaries, SDK
/// bundles). A cache hit never touches the network.
pub async fn cache_first(
    cache: &CacheDb,
    bucket: &str,
    network: &Arc<dyn Network>,
    request: &WorkerRequest,
) -> WorkerResponse {
    if let Some(cached) = lookup(cache, bucket, request.url.as_str()).await {
        tracing::debug!(url = %request.url, "cache-first hit");
        return cached;
    }

    match network.fetch(request).await {
        Ok(response) => {
            if response.is_ok() {
                store(cache, bucket, request, &response).await;
            }
            response
        }
        Err(e) => {
            tracing::debug!(url = %request.url, error = %e, "cache-first miss with no network");
            WorkerResponse::offline()
        }
    }
}

/// Always attempt the network; fall back to the cache on failure.
///
/// Used for the application shell. Offline navigations additionally fall
/// back to the cached shell document before giving up with a plain-text
/// 503.
pub async fn network_first(
    cache: &CacheDb,
    bucket: &str,
    network: &Arc<dyn Network>,
    request: &WorkerRequest,
    shell_url: &Url,
) -> WorkerResponse {
    match network.fetch(request).await {
        Ok(response) => {
            if response.is_ok() {
                store(cache, bucket, request, &response).await;
            }
            response
        }
        Err(e) => {
            tracing::debug!(url = %request.url, error = %e, "network-first falling back to cache");

            if let Some(cached) = lookup(cache, bucket, request.url.as_str()).await {
                return cached;
            }

            if request.navigation
                && let Some(shell) = lookup(cache, bucket, shell_url.as_str()).await
            {
                tracing::debug!(url = %request.url, "serving cached shell for offline navigation");
                return shell;
            }

            WorkerResponse::shell_unavailable()
        }
    }
}

/// Serve the cache immediately if present and refresh it in the background.
///
/// The caller never waits on the network when a cached copy exists:
/// freshness is eventual. Background fetch errors are swallowed; a
/// successful 2xx refresh is stored for the next request. On a cache miss
/// the fetch is awaited inline.
pub async fn stale_while_revalidate(
    cache: &CacheDb,
    bucket: &str,
    network: &Arc<dyn Network>,
    request: &WorkerRequest,
) -> WorkerResponse {
    // Cache check strictly before any network wait.
    let cached = lookup(cache, bucket, request.url.as_str()).await;

    let revalidate = {
        let cache = cache.clone();
        let bucket = bucket.to_string();
        let network = Arc::clone(network);
        let request = request.clone();
        async move {
            match network.fetch(&request).await {
                Ok(response) => {
                    if response.is_ok() {
                        store(&cache, &bucket, &request, &response).await;
                    }
                    Some(response)
                }
                Err(e) => {
                    tracing::debug!(url = %request.url, error = %e, "background revalidation failed");
                    None
                }
            }
        }
    };

    if let Some(cached) = cached {
        tracing::debug!(url = %request.url, "serving stale, revalidating in background");
        tokio::spawn(revalidate);
        return cached;
    }

    revalidate.await.unwrap_or_else(WorkerResponse::empty_unavailable)
}

/// Direct pass to the network, never cached.
///
/// Used for live API origins whose data must never be served stale. Any
/// transport failure collapses to an empty 503.
pub async fn network_only(network: &Arc<dyn Network>, request: &WorkerRequest) -> WorkerResponse {
    match network.fetch(request).await {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!(url = %request.url, error = %e, "network-only fetch failed");
            WorkerResponse::empty_unavailable()
        }
    }
}

async fn lookup(cache: &CacheDb, bucket: &str, url: &str) -> Option<WorkerResponse> {
    match cache.match_entry(bucket, url).await {
        Ok(Some(snapshot)) => Some(WorkerResponse::from_snapshot(&snapshot)),
        Ok(None) => None,
        Err(e) => {
            tracing::warn!(url, error = %e, "cache lookup failed; treating as miss");
            None
        }
    }
}

async fn store(cache: &CacheDb, bucket: &str, request: &WorkerRequest, response: &WorkerResponse) {
    let snapshot = response.to_snapshot(request.url.as_str());
    if let Err(e) = cache.put_entry(bucket, &snapshot).await {
        tracing::warn!(url = %request.url, error = %e, "failed to store response");
    }
}
