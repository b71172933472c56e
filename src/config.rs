//! Client configuration.
//!
//! Configuration is stored in `.newsdesk/config.yaml` and includes:
//! - Backend base URL and request timeout
//! - Optional API token
//! - Page size and the timing knobs of the sync engine

use std::env;
use std::fmt;
use std::fs;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{NewsdeskError, Result};
use crate::paths::config_path;
use crate::sync::PollPolicy;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Base URL of the news backend
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Items per page for every paginated screen (default: 30)
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Quiet period before a suggestion lookup, in milliseconds (default: 100)
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Status polling after an article is created
    #[serde(default, skip_serializing_if = "PollConfig::is_default")]
    pub poll: PollConfig,

    /// Distance from the bottom at which the next page is requested
    #[serde(default, skip_serializing_if = "ScrollConfig::is_default")]
    pub scroll: ScrollConfig,

    /// Authentication
    #[serde(default, skip_serializing_if = "AuthConfig::is_empty")]
    pub auth: AuthConfig,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_page_size() -> u32 {
    30
}

fn default_debounce_ms() -> u64 {
    100
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout: default_request_timeout(),
            page_size: default_page_size(),
            debounce_ms: default_debounce_ms(),
            poll: PollConfig::default(),
            scroll: ScrollConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

/// Polling configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PollConfig {
    /// Seconds between status checks (default: 5)
    #[serde(default = "default_poll_interval")]
    pub interval_secs: u64,

    /// Status checks before giving up (default: 12)
    #[serde(default = "default_poll_attempts")]
    pub max_attempts: u32,
}

fn default_poll_interval() -> u64 {
    5
}

fn default_poll_attempts() -> u32 {
    12
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_poll_interval(),
            max_attempts: default_poll_attempts(),
        }
    }
}

impl PollConfig {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Scroll trigger thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScrollConfig {
    /// Threshold on the news feed (default: 300)
    #[serde(default = "default_feed_threshold")]
    pub feed_threshold: f64,

    /// Threshold on the search overlay and publisher list (default: 100)
    #[serde(default = "default_threshold")]
    pub default_threshold: f64,
}

fn default_feed_threshold() -> f64 {
    300.0
}

fn default_threshold() -> f64 {
    100.0
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            feed_threshold: default_feed_threshold(),
            default_threshold: default_threshold(),
        }
    }
}

impl ScrollConfig {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Authentication configuration
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl AuthConfig {
    pub fn is_empty(&self) -> bool {
        self.token.is_none()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Keys accepted by `newsdesk config get/set`
pub const CONFIG_KEYS: &[&str] = &[
    "api_url",
    "request_timeout",
    "page_size",
    "debounce_ms",
    "poll.interval_secs",
    "poll.max_attempts",
    "scroll.feed_threshold",
    "scroll.default_threshold",
    "auth.token",
];

impl Config {
    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = config_path();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            NewsdeskError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml_ng::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(NewsdeskError::Config("page_size must be positive".into()));
        }
        if self.poll.interval_secs == 0 {
            return Err(NewsdeskError::Config(
                "poll.interval_secs must be positive".into(),
            ));
        }
        if self.poll.max_attempts == 0 {
            return Err(NewsdeskError::Config(
                "poll.max_attempts must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = config_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                NewsdeskError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create directory for config at {}: {}",
                        parent.display(),
                        e
                    ),
                ))
            })?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content).map_err(|e| {
            NewsdeskError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write config at {}: {}", path.display(), e),
            ))
        })?;

        // The file may hold a token: owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&path, permissions)?;
        }

        Ok(())
    }

    /// Backend URL from `NEWSDESK_API_URL` or the config file
    pub fn api_url(&self) -> String {
        if let Ok(url) = env::var("NEWSDESK_API_URL")
            && !url.is_empty()
        {
            return url;
        }
        self.api_url.clone()
    }

    /// API token from `NEWSDESK_TOKEN` or the config file
    pub fn token(&self) -> Option<String> {
        if let Ok(token) = env::var("NEWSDESK_TOKEN")
            && !token.is_empty()
        {
            return Some(token);
        }
        self.auth.token.clone()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll.interval_secs)
    }

    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            interval: self.poll_interval(),
            max_attempts: self.poll.max_attempts,
            ..PollPolicy::default()
        }
    }

    /// Read a single key as display text
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "api_url" => self.api_url.clone(),
            "request_timeout" => self.request_timeout.to_string(),
            "page_size" => self.page_size.to_string(),
            "debounce_ms" => self.debounce_ms.to_string(),
            "poll.interval_secs" => self.poll.interval_secs.to_string(),
            "poll.max_attempts" => self.poll.max_attempts.to_string(),
            "scroll.feed_threshold" => self.scroll.feed_threshold.to_string(),
            "scroll.default_threshold" => self.scroll.default_threshold.to_string(),
            "auth.token" => match &self.auth.token {
                Some(_) => "[REDACTED]".to_string(),
                None => "(not set)".to_string(),
            },
            _ => return Err(unknown_key(key)),
        };
        Ok(value)
    }

    /// Set a single key from text
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api_url" => self.api_url = value.trim().to_string(),
            "request_timeout" => self.request_timeout = parse_number(key, value)?,
            "page_size" => self.page_size = parse_number(key, value)?,
            "debounce_ms" => self.debounce_ms = parse_number(key, value)?,
            "poll.interval_secs" => self.poll.interval_secs = parse_number(key, value)?,
            "poll.max_attempts" => self.poll.max_attempts = parse_number(key, value)?,
            "scroll.feed_threshold" => self.scroll.feed_threshold = parse_number(key, value)?,
            "scroll.default_threshold" => {
                self.scroll.default_threshold = parse_number(key, value)?
            }
            "auth.token" => {
                let token = value.trim();
                self.auth.token = (!token.is_empty()).then(|| token.to_string());
            }
            _ => return Err(unknown_key(key)),
        }
        self.validate()
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| NewsdeskError::Config(format!("invalid value '{value}' for {key}")))
}

fn unknown_key(key: &str) -> NewsdeskError {
    NewsdeskError::Config(format!(
        "unknown config key '{key}', expected one of: {}",
        CONFIG_KEYS.join(", ")
    ))
}
