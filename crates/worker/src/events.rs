//! Event kinds delivered by the host platform.
//!
//! The platform's event callbacks map onto a single dispatch surface:
//! [`crate::worker::OfflineWorker::dispatch`] takes a [`WorkerEvent`] and
//! routes it to the matching handler.

use crate::http::{WorkerRequest, WorkerResponse};

/// An event delivered to the worker.
#[derive(Debug, Clone)]
pub enum WorkerEvent {
    /// Install: create and populate the current cache bucket.
    Install,
    /// Activate: purge stale buckets and claim clients.
    Activate,
    /// An interceptable request.
    Fetch(WorkerRequest),
    /// A push message with its optional payload bytes.
    Push(Option<Vec<u8>>),
    /// A displayed notification was clicked.
    NotificationClick {
        tag: String,
        /// Click target stored when the notification was shown.
        target_url: Option<String>,
    },
    /// Background sync trigger. Reserved hook, currently a no-op.
    Sync { tag: String },
}

/// Outcome of dispatching an event.
#[derive(Debug)]
pub enum Handled {
    /// Event consumed; nothing to hand back.
    Done,
    /// Fetch outcome: `Some` substitutes the response, `None` means the
    /// request was not intercepted and the platform fetches natively.
    Fetch(Option<WorkerResponse>),
}
