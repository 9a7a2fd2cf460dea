//! Application configuration
//!
//! Configuration loaded from `.pr-trigger.toml`, with environment overrides.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable overriding [`AppConfig::base_url`]
pub const ENV_BASE_URL: &str = "PR_TRIGGER_BASE_URL";
/// Environment variable overriding [`AppConfig::buttons_admin_path`]
pub const ENV_ADMIN_PATH: &str = "PR_TRIGGER_ADMIN_PATH";
/// Environment variable overriding [`AppConfig::min_busy_ms`]
pub const ENV_MIN_BUSY_MS: &str = "PR_TRIGGER_MIN_BUSY_MS";

/// Application configuration loaded from .pr-trigger.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Server root, e.g. "https://bitbucket.example.com"
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the trigger button admin resource, relative to `base_url`
    #[serde(default = "default_buttons_admin_path")]
    pub buttons_admin_path: String,

    /// Minimum time a button stays busy after a successful response
    #[serde(default = "default_min_busy_ms")]
    pub min_busy_ms: u64,

    /// Delay between a reviewer approval and reloading the buttons
    #[serde(default = "default_refresh_delay_ms")]
    pub refresh_delay_ms: u64,

    /// HTTP request timeout
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Label of the injected menu toggle
    #[serde(default = "default_menu_label")]
    pub menu_label: String,
}

fn default_base_url() -> String {
    "http://localhost:7990/bitbucket".to_string()
}

fn default_buttons_admin_path() -> String {
    "/rest/prnfb-admin/1.0/settings/buttons".to_string()
}

fn default_min_busy_ms() -> u64 {
    500
}

fn default_refresh_delay_ms() -> u64 {
    1000
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_menu_label() -> String {
    "PR-Notifier Buttons".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            buttons_admin_path: default_buttons_admin_path(),
            min_busy_ms: default_min_busy_ms(),
            refresh_delay_ms: default_refresh_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            menu_label: default_menu_label(),
        }
    }
}

impl AppConfig {
    /// Load config from CWD, home or config directory (in that order), or use
    /// defaults. Environment overrides are applied last.
    pub fn load() -> Self {
        let mut config = Self::from_file().unwrap_or_else(|| {
            log::debug!("Using default app config");
            Self::default()
        });
        config.apply_env_overrides();
        config
    }

    fn from_file() -> Option<Self> {
        let content = crate::load_config_file()?;
        match toml::from_str(&content) {
            Ok(config) => {
                log::info!("Loaded app config from file");
                Some(config)
            }
            Err(e) => {
                log::warn!("Failed to parse config file: {}", e);
                None
            }
        }
    }

    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            log::debug!("{} overrides base_url", ENV_BASE_URL);
            self.base_url = url;
        }
        if let Some(path) = lookup(ENV_ADMIN_PATH).filter(|v| !v.trim().is_empty()) {
            log::debug!("{} overrides buttons_admin_path", ENV_ADMIN_PATH);
            self.buttons_admin_path = path;
        }
        if let Some(raw) = lookup(ENV_MIN_BUSY_MS) {
            match raw.trim().parse() {
                Ok(ms) => self.min_busy_ms = ms,
                Err(e) => log::warn!("Ignoring {}={:?}: {}", ENV_MIN_BUSY_MS, raw, e),
            }
        }
    }

    /// Base URL of the button resource, without trailing slash
    ///
    /// e.g. `http://localhost:7990/bitbucket/rest/prnfb-admin/1.0/settings/buttons`
    pub fn buttons_admin_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = self.buttons_admin_path.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }

    pub fn min_busy(&self) -> Duration {
        Duration::from_millis(self.min_busy_ms)
    }

    pub fn refresh_delay(&self) -> Duration {
        Duration::from_millis(self.refresh_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
