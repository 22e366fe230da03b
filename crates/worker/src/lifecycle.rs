//! Worker lifecycle state and install-time cache population.
//!
//! The worker moves installing → installed → activating → active. The
//! standard waiting phase between installed and activating is skipped
//! deliberately: cached assets are versioned by bucket name, so an update
//! is atomic at the bucket-swap boundary and instant rollout is safe.

use std::sync::Arc;

use calio_core::CacheDb;
use futures_util::future::join_all;
use url::Url;

use crate::http::WorkerRequest;
use crate::platform::Network;

/// Lifecycle states of the worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// Install event in progress: bucket being created and populated.
    Installing,
    /// Install complete; eligible to activate immediately (no waiting).
    Installed,
    /// Activate event in progress: stale buckets being purged.
    Activating,
    /// Active and controlling clients; fetches are intercepted.
    Active,
}

impl WorkerState {
    /// Whether fetch events are intercepted in this state.
    pub fn can_intercept(&self) -> bool {
        matches!(self, WorkerState::Active)
    }
}

impl std::fmt::Display for WorkerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkerState::Installing => write!(f, "installing"),
            WorkerState::Installed => write!(f, "installed"),
            WorkerState::Activating => write!(f, "activating"),
            WorkerState::Active => write!(f, "active"),
        }
    }
}

/// Resolve configured asset entries against the app origin.
///
/// Relative entries ("./index.html") join onto the origin; absolute ones
/// pass through. Entries that fail to resolve are logged and skipped,
/// consistent with install population being best-effort.
pub(crate) fn resolve_asset_urls(origin: &Url, assets: &[String]) -> Vec<Url> {
    assets
        .iter()
        .filter_map(|asset| match origin.join(asset) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!(asset, error = %e, "could not resolve static asset; skipping");
                None
            }
        })
        .collect()
}

/// Fetch-and-store each asset into the bucket, all-settled.
///
/// Assets are fetched concurrently. Every failure is caught and logged;
/// one unreachable asset never aborts the rest of the batch. Partial
/// success is observable only through the logs.
pub(crate) async fn populate(cache: &CacheDb, bucket: &str, network: &Arc<dyn Network>, assets: &[Url]) {
    let fetches = assets.iter().map(|asset| async move {
        let request = WorkerRequest::get(asset.clone());
        match network.fetch(&request).await {
            Ok(response) if response.is_ok() => {
                let snapshot = response.to_snapshot(asset.as_str());
                match cache.put_entry(bucket, &snapshot).await {
                    Ok(()) => true,
                    Err(e) => {
                        tracing::warn!(url = %asset, error = %e, "could not cache asset");
                        false
                    }
                }
            }
            Ok(response) => {
                tracing::warn!(url = %asset, status = response.status.as_u16(), "could not cache asset");
                false
            }
            Err(e) => {
                tracing::warn!(url = %asset, error = %e, "could not cache asset");
                false
            }
        }
    });

    let stored = join_all(fetches).await.into_iter().filter(|stored| *stored).count();
    tracing::info!(stored, total = assets.len(), bucket, "static assets populated");
}
