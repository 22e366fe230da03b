//! Push notification bridge.
//!
//! Independent of the caching logic: push payloads become system
//! notifications, and notification clicks open a client window at the
//! stored target URL.

use calio_core::AppConfig;
use serde::Deserialize;

/// Application name shown when a payload carries no title.
const DEFAULT_TITLE: &str = "CalIO";

/// Target opened when a payload carries no URL.
const DEFAULT_TARGET: &str = "./";

/// JSON payload carried by a push event. Every field is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct PushPayload {
    pub title: Option<String>,
    pub body: Option<String>,
    pub tag: Option<String>,
    pub url: Option<String>,
    pub icon: Option<String>,
    pub badge: Option<String>,
}

/// A notification ready to hand to the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub tag: String,
    /// Opened when the notification is clicked.
    pub target_url: String,
}

impl Notification {
    /// Build a notification from a payload, filling configured defaults.
    pub fn from_payload(payload: PushPayload, config: &AppConfig) -> Self {
        Self {
            title: payload.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            body: payload.body.unwrap_or_default(),
            icon: payload.icon.unwrap_or_else(|| config.notification_icon.clone()),
            badge: payload.badge.unwrap_or_else(|| config.notification_badge.clone()),
            tag: payload.tag.unwrap_or_else(|| config.notification_tag.clone()),
            target_url: payload.url.unwrap_or_else(|| DEFAULT_TARGET.to_string()),
        }
    }
}

/// Parse push payload bytes, warning and discarding on malformed JSON.
pub fn parse_payload(data: &[u8]) -> Option<PushPayload> {
    match serde_json::from_slice(data) {
        Ok(payload) => Some(payload),
        Err(e) => {
            tracing::warn!(error = %e, "malformed push payload ignored");
            None
        }
    }
}
