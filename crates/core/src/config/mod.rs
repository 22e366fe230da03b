//! Worker configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (CALIO_*)
//! 2. TOML config file (if CALIO_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Worker configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (CALIO_*)
/// 2. TOML config file (if CALIO_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Current cache generation. Bucket names differing from this value
    /// are purged on activation.
    ///
    /// Set via CALIO_CACHE_VERSION environment variable.
    #[serde(default = "default_cache_version")]
    pub cache_version: String,

    /// Origin the application shell is served from. Requests to this
    /// origin are routed network-first.
    ///
    /// Set via CALIO_APP_ORIGIN environment variable.
    #[serde(default = "default_app_origin")]
    pub app_origin: String,

    /// Shell asset URLs populated into the cache at install time.
    /// Relative entries are resolved against `app_origin`.
    ///
    /// Set via CALIO_STATIC_ASSETS environment variable (comma-separated).
    #[serde(default = "default_static_assets")]
    pub static_assets: Vec<String>,

    /// External API hostnames routed network-only, never cached.
    ///
    /// Set via CALIO_NETWORK_ONLY_HOSTS environment variable (comma-separated).
    #[serde(default = "default_network_only_hosts")]
    pub network_only_hosts: Vec<String>,

    /// Hostnames served stale-while-revalidate (font CSS, which may
    /// reference updated font versions).
    ///
    /// Set via CALIO_REVALIDATE_HOSTS environment variable (comma-separated).
    #[serde(default = "default_revalidate_hosts")]
    pub revalidate_hosts: Vec<String>,

    /// Hostnames served cache-first (font binaries and SDK bundles,
    /// immutable once published).
    ///
    /// Set via CALIO_IMMUTABLE_HOSTS environment variable (comma-separated).
    #[serde(default = "default_immutable_hosts")]
    pub immutable_hosts: Vec<String>,

    /// Document returned for offline navigations when the requested page
    /// is not cached.
    ///
    /// Set via CALIO_SHELL_FALLBACK environment variable.
    #[serde(default = "default_shell_fallback")]
    pub shell_fallback: String,

    /// Default notification icon path.
    ///
    /// Set via CALIO_NOTIFICATION_ICON environment variable.
    #[serde(default = "default_notification_icon")]
    pub notification_icon: String,

    /// Default notification badge path.
    ///
    /// Set via CALIO_NOTIFICATION_BADGE environment variable.
    #[serde(default = "default_notification_badge")]
    pub notification_badge: String,

    /// Default notification grouping tag.
    ///
    /// Set via CALIO_NOTIFICATION_TAG environment variable.
    #[serde(default = "default_notification_tag")]
    pub notification_tag: String,

    /// Background sync tag recognized by the reserved sync hook.
    ///
    /// Set via CALIO_SYNC_TAG environment variable.
    #[serde(default = "default_sync_tag")]
    pub sync_tag: String,

    /// Path to the SQLite cache database.
    ///
    /// Set via CALIO_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via CALIO_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum bytes to fetch per request.
    ///
    /// Set via CALIO_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via CALIO_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_cache_version() -> String {
    "calio-v1".into()
}

fn default_app_origin() -> String {
    "https://calio.app".into()
}

fn default_static_assets() -> Vec<String> {
    vec![
        "./index.html".into(),
        "./manifest.json".into(),
        "./icons/icon-192x192.png".into(),
        "./icons/icon-512x512.png".into(),
        "https://fonts.googleapis.com/css2?family=DM+Sans:wght@300;400;500;600&family=DM+Serif+Display:ital@0;1&display=swap".into(),
        "https://fonts.gstatic.com/s/dmsans/v14/rP2tp2ywxg089UriI5-g4vlH9VoD8Cmcqbu6-K6z9mXgjU0.woff2".into(),
    ]
}

fn default_network_only_hosts() -> Vec<String> {
    vec![
        "firestore.googleapis.com".into(),
        "firebase.googleapis.com".into(),
        "www.googleapis.com".into(),
        "identitytoolkit.googleapis.com".into(),
    ]
}

fn default_revalidate_hosts() -> Vec<String> {
    vec!["fonts.googleapis.com".into()]
}

fn default_immutable_hosts() -> Vec<String> {
    vec!["fonts.gstatic.com".into(), "www.gstatic.com".into()]
}

fn default_shell_fallback() -> String {
    "./index.html".into()
}

fn default_notification_icon() -> String {
    "./icons/icon-192x192.png".into()
}

fn default_notification_badge() -> String {
    "./icons/icon-96x96.png".into()
}

fn default_notification_tag() -> String {
    "calio".into()
}

fn default_sync_tag() -> String {
    "calio-sync".into()
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./calio-cache.sqlite")
}

fn default_user_agent() -> String {
    "calio-worker/0.1".into()
}

fn default_max_bytes() -> usize {
    5_242_880 // 5MB
}

fn default_timeout_ms() -> u64 {
    20_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_version: default_cache_version(),
            app_origin: default_app_origin(),
            static_assets: default_static_assets(),
            network_only_hosts: default_network_only_hosts(),
            revalidate_hosts: default_revalidate_hosts(),
            immutable_hosts: default_immutable_hosts(),
            shell_fallback: default_shell_fallback(),
            notification_icon: default_notification_icon(),
            notification_badge: default_notification_badge(),
            notification_tag: default_notification_tag(),
            sync_tag: default_sync_tag(),
            db_path: default_db_path(),
            user_agent: default_user_agent(),
            max_bytes: default_max_bytes(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `CALIO_`
    /// 2. TOML file from `CALIO_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("CALIO_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("CALIO_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.cache_version, "calio-v1");
        assert_eq!(config.app_origin, "https://calio.app");
        assert_eq!(config.static_assets.len(), 6);
        assert_eq!(config.network_only_hosts.len(), 4);
        assert_eq!(config.revalidate_hosts, vec!["fonts.googleapis.com"]);
        assert_eq!(config.immutable_hosts, vec!["fonts.gstatic.com", "www.gstatic.com"]);
        assert_eq!(config.shell_fallback, "./index.html");
        assert_eq!(config.notification_tag, "calio");
        assert_eq!(config.sync_tag, "calio-sync");
        assert_eq!(config.db_path, PathBuf::from("./calio-cache.sqlite"));
        assert_eq!(config.max_bytes, 5_242_880);
        assert_eq!(config.timeout_ms, 20_000);
    }

    #[test]
    fn test_timeout_duration() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(20_000));
    }

    #[test]
    fn test_shell_assets_include_fallback() {
        let config = AppConfig::default();
        assert!(config.static_assets.contains(&config.shell_fallback));
    }
}
