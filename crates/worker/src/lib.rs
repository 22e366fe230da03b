//! Fetch-interception worker for the CalIO application shell.
//!
//! This crate implements the offline layer that sits between an
//! application and the network: every intercepted GET request is
//! classified by origin and navigation intent, then served by exactly one
//! caching strategy (cache-first, network-first, or
//! stale-while-revalidate) against a versioned cache bucket, or passed to
//! the network untouched.
//!
//! The host platform is consumed through the capability traits in
//! [`platform`]; substituting fakes makes the whole worker testable
//! without a browser, a network, or persistent storage.

pub mod events;
pub mod gateway;
pub mod http;
pub mod lifecycle;
pub mod notify;
pub mod platform;
pub mod router;
pub mod strategy;
pub mod worker;

#[cfg(test)]
pub(crate) mod testutil;

pub use events::{Handled, WorkerEvent};
pub use gateway::HttpNetwork;
pub use http::{WorkerRequest, WorkerResponse};
pub use lifecycle::WorkerState;
pub use notify::{Notification, PushPayload};
pub use platform::{Clients, Network, Notifications};
pub use router::{Route, Router};
pub use worker::OfflineWorker;
