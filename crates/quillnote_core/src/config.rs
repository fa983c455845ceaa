//! Client configuration.
//!
//! # Responsibility
//! - Resolve backend URL, request timeout and logging settings.
//! - Validate values once so flows can rely on them.
//!
//! # Invariants
//! - `api_base_url` is `http(s)://host...` with no trailing slash.
//! - `request_timeout` is non-zero.
//! - `logging.level` is one of `trace|debug|info|warn|error`.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const API_URL_ENV_VAR: &str = "QUILLNOTE_API_URL";
pub const TIMEOUT_ENV_VAR: &str = "QUILLNOTE_TIMEOUT_SECS";
pub const LOG_LEVEL_ENV_VAR: &str = "QUILLNOTE_LOG_LEVEL";
pub const LOG_DIR_ENV_VAR: &str = "QUILLNOTE_LOG_DIR";

const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Configuration failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Required setting is absent or blank.
    Missing(&'static str),
    /// Base URL is not an absolute http(s) URL.
    InvalidUrl(String),
    /// Timeout is not a positive integer number of seconds.
    InvalidTimeout(String),
    /// Log level is not recognized.
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(name) => write!(f, "missing required setting `{name}`"),
            Self::InvalidUrl(value) => {
                write!(f, "invalid api url `{value}`; expected http(s)://host[:port][/path]")
            }
            Self::InvalidTimeout(value) => {
                write!(f, "invalid timeout `{value}`; expected a positive number of seconds")
            }
            Self::InvalidLogLevel(message) => f.write_str(message),
        }
    }
}

impl Error for ConfigError {}

/// Logging settings. File logging stays off without a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: &'static str,
    pub dir: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: None,
        }
    }
}

impl LogConfig {
    /// Resolves `QUILLNOTE_LOG_LEVEL` and `QUILLNOTE_LOG_DIR` through `lookup`.
    ///
    /// The level is validated even when no directory is set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = non_blank(&lookup, LOG_LEVEL_ENV_VAR) {
            config.level = normalize_level(&raw).map_err(ConfigError::InvalidLogLevel)?;
        }
        config.dir = non_blank(&lookup, LOG_DIR_ENV_VAR).map(|value| PathBuf::from(value.trim()));
        Ok(config)
    }
}

/// Resolved client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub logging: LogConfig,
}

impl ClientConfig {
    /// Builds a config for `api_base_url` with default timeout and logging.
    pub fn new(api_base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_base_url: normalize_base_url(api_base_url)?,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            logging: LogConfig::default(),
        })
    }

    /// Resolves every `QUILLNOTE_*` setting through `lookup`.
    ///
    /// Callers layer sources inside `lookup`, e.g. command-line flags over
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url =
            non_blank(&lookup, API_URL_ENV_VAR).ok_or(ConfigError::Missing(API_URL_ENV_VAR))?;
        let mut config = Self::new(&api_url)?;
        if let Some(raw) = non_blank(&lookup, TIMEOUT_ENV_VAR) {
            config.request_timeout = parse_timeout(&raw)?;
        }
        config.logging = LogConfig::from_lookup(lookup)?;
        Ok(config)
    }
}

fn non_blank<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).filter(|value| !value.trim().is_empty())
}

/// Validates an http(s) base URL and strips trailing slashes.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .ok_or_else(|| ConfigError::InvalidUrl(raw.to_string()))?;
    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if host.is_empty() || host.contains(char::is_whitespace) {
        return Err(ConfigError::InvalidUrl(raw.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Parses a positive timeout in whole seconds.
pub fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}
