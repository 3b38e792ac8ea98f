//! Client configuration.
//!
//! Defaults, then `ENCYCLO_*` environment variables, then command-line flags
//! (applied by the caller through the builder methods).
//!
//! # Example
//!
//! ```ignore
//! use encyclo::config::ClientConfig;
//!
//! let config = ClientConfig::from_env()?
//!     .with_base_url("http://localhost:9000")
//!     .with_max_rounds(5);
//! ```

use std::time::Duration;

use thiserror::Error;

use crate::models::{normalize_max_rounds, DEFAULT_MAX_ROUNDS};
use crate::render::DEFAULT_OUTLINE_DEBOUNCE;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

pub const ENV_BASE_URL: &str = "ENCYCLO_BASE_URL";
pub const ENV_MAX_ROUNDS: &str = "ENCYCLO_MAX_ROUNDS";
pub const ENV_DEBOUNCE_MS: &str = "ENCYCLO_DEBOUNCE_MS";
pub const ENV_TIMEOUT_SECS: &str = "ENCYCLO_TIMEOUT_SECS";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a whole number, got {value:?}")]
    InvalidNumber { key: String, value: String },

    #[error("{key} must be an http(s) URL, got {value:?}")]
    InvalidUrl { key: String, value: String },

    #[error("{key} must be greater than zero")]
    Zero { key: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin, without a trailing slash
    pub base_url: String,
    /// Rounds requested on start
    pub max_rounds: u32,
    /// Quiet period before the outline is rebuilt
    pub outline_debounce: Duration,
    /// Whole-request timeout; `None` lets long revision loops run
    pub request_timeout: Option<Duration>,
    /// Send logs to a file instead of stderr (the TUI owns the terminal)
    pub log_to_file: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_rounds: DEFAULT_MAX_ROUNDS,
            outline_debounce: DEFAULT_OUTLINE_DEBOUNCE,
            request_timeout: None,
            log_to_file: true,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Values `<= 0` fall back to the default round count.
    pub fn with_max_rounds(mut self, max_rounds: i64) -> Self {
        self.max_rounds = normalize_max_rounds(max_rounds);
        self
    }

    pub fn with_outline_debounce(mut self, debounce: Duration) -> Self {
        self.outline_debounce = debounce;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_log_to_file(mut self, log_to_file: bool) -> Self {
        self.log_to_file = log_to_file;
        self
    }

    /// Defaults overridden by `ENCYCLO_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_BASE_URL) {
            config = config.with_base_url(validate_url(ENV_BASE_URL, &url)?);
        }
        if let Some(value) = lookup(ENV_MAX_ROUNDS) {
            config = config.with_max_rounds(parse_number(ENV_MAX_ROUNDS, &value)?);
        }
        if let Some(value) = lookup(ENV_DEBOUNCE_MS) {
            let ms = parse_number(ENV_DEBOUNCE_MS, &value)?;
            let ms = u64::try_from(ms).map_err(|_| ConfigError::InvalidNumber {
                key: ENV_DEBOUNCE_MS.to_string(),
                value: value.clone(),
            })?;
            config = config.with_outline_debounce(Duration::from_millis(ms));
        }
        if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
            let secs = parse_number(ENV_TIMEOUT_SECS, &value)?;
            if secs <= 0 {
                return Err(ConfigError::Zero {
                    key: ENV_TIMEOUT_SECS.to_string(),
                });
            }
            config = config.with_request_timeout(Some(Duration::from_secs(secs as u64)));
        }

        Ok(config)
    }
}

/// Parse a signed whole number, naming `key` on failure.
pub fn parse_number(key: &str, value: &str) -> Result<i64, ConfigError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| ConfigError::InvalidNumber {
            key: key.to_string(),
            value: value.to_string(),
        })
}

/// Accept only absolute http(s) URLs.
pub fn validate_url<'a>(key: &str, value: &'a str) -> Result<&'a str, ConfigError> {
    let trimmed = value.trim();
    let rest = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"));
    match rest {
        Some(host) if !host.is_empty() && !host.starts_with('/') => Ok(trimmed),
        _ => Err(ConfigError::InvalidUrl {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
