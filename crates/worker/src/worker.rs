//! The assembled offline worker.
//!
//! [`OfflineWorker`] wires configuration, the cache store, and the
//! platform capabilities together, drives the install/activate lifecycle,
//! and answers fetch, push, notification-click, and sync events.

use std::sync::{Arc, RwLock};

use calio_core::{AppConfig, CacheDb, Error};
use url::Url;

use crate::events::{Handled, WorkerEvent};
use crate::http::{WorkerRequest, WorkerResponse};
use crate::lifecycle::{self, WorkerState};
use crate::notify::{self, Notification};
use crate::platform::{Clients, Network, Notifications};
use crate::router::{Route, Router};
use crate::strategy;

/// The fetch-interception worker.
pub struct OfflineWorker {
    config: AppConfig,
    cache: CacheDb,
    network: Arc<dyn Network>,
    clients: Arc<dyn Clients>,
    notifications: Arc<dyn Notifications>,
    router: Router,
    origin: Url,
    shell_url: Url,
    state: RwLock<WorkerState>,
}

impl OfflineWorker {
    /// Assemble a worker from configuration, storage, and capabilities.
    pub fn new(
        config: AppConfig,
        cache: CacheDb,
        network: Arc<dyn Network>,
        clients: Arc<dyn Clients>,
        notifications: Arc<dyn Notifications>,
    ) -> Result<Self, Error> {
        let origin =
            Url::parse(&config.app_origin).map_err(|e| Error::InvalidUrl(format!("{}: {}", config.app_origin, e)))?;
        let shell_url = origin
            .join(&config.shell_fallback)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", config.shell_fallback, e)))?;
        let router = Router::new(&config, &origin);

        Ok(Self {
            config,
            cache,
            network,
            clients,
            notifications,
            router,
            origin,
            shell_url,
            state: RwLock::new(WorkerState::Installing),
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> WorkerState {
        *self.state.read().unwrap()
    }

    fn set_state(&self, state: WorkerState) {
        *self.state.write().unwrap() = state;
    }

    /// Dispatch one platform event to its handler.
    pub async fn dispatch(&self, event: WorkerEvent) -> Result<Handled, Error> {
        match event {
            WorkerEvent::Install => {
                self.install().await?;
                Ok(Handled::Done)
            }
            WorkerEvent::Activate => {
                self.activate().await?;
                Ok(Handled::Done)
            }
            WorkerEvent::Fetch(request) => Ok(Handled::Fetch(self.handle_fetch(&request).await)),
            WorkerEvent::Push(data) => {
                self.handle_push(data.as_deref()).await;
                Ok(Handled::Done)
            }
            WorkerEvent::NotificationClick { tag, target_url } => {
                self.handle_notification_click(&tag, target_url.as_deref()).await;
                Ok(Handled::Done)
            }
            WorkerEvent::Sync { tag } => {
                self.handle_sync(&tag);
                Ok(Handled::Done)
            }
        }
    }

    /// Install: open the current bucket and precache the shell, then skip
    /// the waiting phase for instant rollout.
    pub async fn install(&self) -> Result<(), Error> {
        tracing::info!(version = %self.config.cache_version, "installing");
        self.set_state(WorkerState::Installing);

        self.cache.open_bucket(&self.config.cache_version).await?;

        let assets = lifecycle::resolve_asset_urls(&self.origin, &self.config.static_assets);
        lifecycle::populate(&self.cache, &self.config.cache_version, &self.network, &assets).await;

        self.set_state(WorkerState::Installed);
        tracing::info!("installed; skipping waiting phase");
        Ok(())
    }

    /// Activate: purge superseded cache generations and take control of
    /// open clients immediately.
    pub async fn activate(&self) -> Result<(), Error> {
        tracing::info!(version = %self.config.cache_version, "activating");
        self.set_state(WorkerState::Activating);

        let purged = self.cache.purge_stale_buckets(&self.config.cache_version).await?;
        if purged > 0 {
            tracing::info!(purged, "deleted stale cache generations");
        }

        self.clients.claim().await?;

        self.set_state(WorkerState::Active);
        tracing::info!("active");
        Ok(())
    }

    /// Classify and serve one intercepted request.
    ///
    /// Returns `None` when the request is not intercepted (non-GET, no
    /// matching rule, or worker not yet active); the platform then fetches
    /// natively.
    pub async fn handle_fetch(&self, request: &WorkerRequest) -> Option<WorkerResponse> {
        if !self.state().can_intercept() {
            tracing::debug!(url = %request.url, state = %self.state(), "not active; passing through");
            return None;
        }

        let route = self.router.classify(request)?;
        tracing::debug!(url = %request.url, ?route, "dispatching");

        let bucket = &self.config.cache_version;
        let response = match route {
            Route::NetworkOnly => strategy::network_only(&self.network, request).await,
            Route::CacheFirst => strategy::cache_first(&self.cache, bucket, &self.network, request).await,
            Route::NetworkFirst => {
                strategy::network_first(&self.cache, bucket, &self.network, request, &self.shell_url).await
            }
            Route::StaleWhileRevalidate => {
                strategy::stale_while_revalidate(&self.cache, bucket, &self.network, request).await
            }
        };

        Some(response)
    }

    /// Show a notification for a push message.
    ///
    /// Events without a payload are silently ignored; malformed payloads
    /// are logged and dropped. Capability failures are absorbed here.
    pub async fn handle_push(&self, data: Option<&[u8]>) {
        let Some(data) = data else {
            tracing::debug!("push event without payload ignored");
            return;
        };
        let Some(payload) = notify::parse_payload(data) else {
            return;
        };

        let notification = Notification::from_payload(payload, &self.config);
        tracing::debug!(tag = %notification.tag, "showing notification");
        if let Err(e) = self.notifications.show(notification).await {
            tracing::warn!(error = %e, "could not show notification");
        }
    }

    /// Dismiss the clicked notification and open its target.
    pub async fn handle_notification_click(&self, tag: &str, target_url: Option<&str>) {
        if let Err(e) = self.notifications.close(tag).await {
            tracing::warn!(tag, error = %e, "could not close notification");
        }

        let target = target_url.unwrap_or("./");
        match self.origin.join(target) {
            Ok(url) => {
                if let Err(e) = self.clients.open_window(&url).await {
                    tracing::warn!(%url, error = %e, "could not open client window");
                }
            }
            Err(e) => {
                tracing::warn!(target, error = %e, "invalid notification click target");
            }
        }
    }

    /// Background sync hook, reserved for future use.
    pub fn handle_sync(&self, tag: &str) {
        if tag == self.config.sync_tag {
            tracing::debug!(tag, "background sync triggered");
        } else {
            tracing::debug!(tag, "unrecognized sync tag ignored");
        }
    }
}
