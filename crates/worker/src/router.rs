//! Request classification.
//!
//! Every intercepted request is matched against a fixed-priority rule
//! table on method, hostname, origin, and navigation intent; the first
//! matching rule picks the strategy. The ordering is significant: external
//! API hosts must win over the generic same-origin/navigation rule, and
//! font CSS is distinguished from font binaries by hostname because only
//! the CSS may reference updated font versions.

use calio_core::AppConfig;
use reqwest::Method;
use url::{Origin, Url};

use crate::http::WorkerRequest;

/// Strategy selected for an intercepted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Direct network fetch, never cached (live API data).
    NetworkOnly,
    /// Serve the cache, refresh in the background.
    StaleWhileRevalidate,
    /// Serve the cache, only fetch on a miss.
    CacheFirst,
    /// Fetch first, fall back to the cache.
    NetworkFirst,
}

/// Classification rule table.
#[derive(Debug, Clone)]
pub struct Router {
    origin: Origin,
    network_only_hosts: Vec<String>,
    revalidate_hosts: Vec<String>,
    immutable_hosts: Vec<String>,
}

impl Router {
    /// Build the rule table from configuration and the parsed app origin.
    pub fn new(config: &AppConfig, origin: &Url) -> Self {
        Self {
            origin: origin.origin(),
            network_only_hosts: config.network_only_hosts.clone(),
            revalidate_hosts: config.revalidate_hosts.clone(),
            immutable_hosts: config.immutable_hosts.clone(),
        }
    }

    /// Classify a request, top-to-bottom, first match wins.
    ///
    /// Returns `None` when the request must not be intercepted: non-GET
    /// methods and requests no rule covers pass through to the platform.
    pub fn classify(&self, request: &WorkerRequest) -> Option<Route> {
        if request.method != Method::GET {
            return None;
        }

        let host = request.host();

        if self.network_only_hosts.iter().any(|h| host.contains(h.as_str())) {
            return Some(Route::NetworkOnly);
        }

        if self.revalidate_hosts.iter().any(|h| host == h) {
            return Some(Route::StaleWhileRevalidate);
        }

        if self.immutable_hosts.iter().any(|h| host == h) {
            return Some(Route::CacheFirst);
        }

        if request.url.origin() == self.origin || request.navigation {
            return Some(Route::NetworkFirst);
        }

        None
    }
}
