//! Fake capability implementations for tests.
//!
//! The worker is exercised against these instead of a real platform: the
//! fake network serves canned responses keyed by URL (or simulates an
//! outage), and the fake clients/notifications record what the worker
//! asked them to do.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use calio_core::Error;
use reqwest::{
    StatusCode,
    header::{CONTENT_TYPE, HeaderMap, HeaderValue},
};
use url::Url;

use crate::http::{WorkerRequest, WorkerResponse};
use crate::notify::Notification;
use crate::platform::{Clients, Network, Notifications};

/// A 200 response with the given content type and body.
pub fn ok_response(content_type: &str, body: &[u8]) -> WorkerResponse {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::try_from(content_type) {
        headers.insert(CONTENT_TYPE, value);
    }
    WorkerResponse::new(StatusCode::OK, headers, Bytes::copy_from_slice(body))
}

/// Canned-response network fake.
#[derive(Default)]
pub struct FakeNetwork {
    responses: Mutex<HashMap<String, WorkerResponse>>,
    calls: Mutex<Vec<String>>,
    down: AtomicBool,
    delay: Mutex<Option<Duration>>,
}

impl FakeNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `response` for the exact URL.
    pub fn insert(&self, url: &str, response: WorkerResponse) {
        self.responses.lock().unwrap().insert(url.to_string(), response);
    }

    /// Simulate a network outage: every fetch errs.
    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    /// Delay every fetch, for asserting that callers do not wait.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// Number of fetches issued so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// URLs fetched, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Network for FakeNetwork {
    async fn fetch(&self, request: &WorkerRequest) -> Result<WorkerResponse, Error> {
        self.calls.lock().unwrap().push(request.url.to_string());

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.down.load(Ordering::SeqCst) {
            return Err(Error::Network("simulated outage".to_string()));
        }

        self.responses
            .lock()
            .unwrap()
            .get(request.url.as_str())
            .cloned()
            .ok_or_else(|| Error::Network(format!("no canned response for {}", request.url)))
    }
}

/// Records claim and open-window calls.
#[derive(Default)]
pub struct FakeClients {
    claimed: AtomicBool,
    opened: Mutex<Vec<String>>,
}

impl FakeClients {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claimed(&self) -> bool {
        self.claimed.load(Ordering::SeqCst)
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait]
impl Clients for FakeClients {
    async fn claim(&self) -> Result<(), Error> {
        self.claimed.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn open_window(&self, url: &Url) -> Result<(), Error> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

/// Records shown and closed notifications.
#[derive(Default)]
pub struct FakeNotifications {
    shown: Mutex<Vec<Notification>>,
    closed: Mutex<Vec<String>>,
}

impl FakeNotifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> Vec<Notification> {
        self.shown.lock().unwrap().clone()
    }

    pub fn closed(&self) -> Vec<String> {
        self.closed.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifications for FakeNotifications {
    async fn show(&self, notification: Notification) -> Result<(), Error> {
        self.shown.lock().unwrap().push(notification);
        Ok(())
    }

    async fn close(&self, tag: &str) -> Result<(), Error> {
        self.closed.lock().unwrap().push(tag.to_string());
        Ok(())
    }
}
