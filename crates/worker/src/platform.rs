//! Capability interface supplied by the host platform.
//!
//! The worker never talks to the outside world directly: network access,
//! client-window control, and system notifications all go through these
//! traits. Production wiring uses [`crate::gateway::HttpNetwork`] for
//! [`Network`]; tests substitute fakes.

use async_trait::async_trait;
use calio_core::Error;
use url::Url;

use crate::http::{WorkerRequest, WorkerResponse};
use crate::notify::Notification;

/// Network fetch primitive.
#[async_trait]
pub trait Network: Send + Sync {
    /// Issue the request over the network.
    ///
    /// Errs only on transport failure (DNS, connect, timeout, oversize
    /// body). An HTTP error status is a completed exchange and comes back
    /// as an `Ok` response.
    async fn fetch(&self, request: &WorkerRequest) -> Result<WorkerResponse, Error>;
}

/// Control over the application's open client pages.
#[async_trait]
pub trait Clients: Send + Sync {
    /// Take control of already-open clients without waiting for the next
    /// navigation.
    async fn claim(&self) -> Result<(), Error>;

    /// Open (or focus) a client window at the given URL.
    async fn open_window(&self, url: &Url) -> Result<(), Error>;
}

/// System notification surface.
#[async_trait]
pub trait Notifications: Send + Sync {
    /// Display a notification.
    async fn show(&self, notification: Notification) -> Result<(), Error>;

    /// Dismiss any displayed notification carrying the given tag.
    async fn close(&self, tag: &str) -> Result<(), Error>;
}
