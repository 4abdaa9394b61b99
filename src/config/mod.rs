//! Configuration handling for the profile parser.
//!
//! Every value the parser needs (endpoints, request headers, timeouts and the
//! connectivity-check knobs) lives here with a working default, so callers can
//! use `Config::default()` directly. `Config::from_env` layers environment
//! overrides on top of those defaults.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Environment variable names read by [`Config::from_env`].
pub const ENV_BASE_URL: &str = "STEAMDB_BASE_URL";
pub const ENV_COMMUNITY_URL: &str = "STEAMDB_COMMUNITY_URL";
pub const ENV_CURRENCY: &str = "STEAMDB_CURRENCY";
pub const ENV_USER_AGENT: &str = "STEAMDB_USER_AGENT";
pub const ENV_COOKIES: &str = "STEAMDB_COOKIES";
pub const ENV_CONNECT_TIMEOUT_SECS: &str = "STEAMDB_CONNECT_TIMEOUT_SECS";
pub const ENV_READ_TIMEOUT_SECS: &str = "STEAMDB_READ_TIMEOUT_SECS";
pub const ENV_CONNECT_RETRIES: &str = "STEAMDB_CONNECT_RETRIES";
pub const ENV_MAINTENANCE_MARKER: &str = "STEAMDB_MAINTENANCE_MARKER";

/// Every variable [`Config::from_env`] reads.
pub const ALL_ENV_VARS: [&str; 9] = [
    ENV_BASE_URL,
    ENV_COMMUNITY_URL,
    ENV_CURRENCY,
    ENV_USER_AGENT,
    ENV_COOKIES,
    ENV_CONNECT_TIMEOUT_SECS,
    ENV_READ_TIMEOUT_SECS,
    ENV_CONNECT_RETRIES,
    ENV_MAINTENANCE_MARKER,
];

pub const DEFAULT_BASE_URL: &str = "https://steamdb.info/calculator";
pub const DEFAULT_COMMUNITY_URL: &str = "http://steamcommunity.com/profiles";
pub const DEFAULT_CURRENCY: &str = "us";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:68.0) Gecko/20100101 Firefox/68.0";
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(3);
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_CONNECT_RETRIES: u32 = 3;
pub const DEFAULT_MAINTENANCE_MARKER: &str = "is under maintenance";

/// Parser runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    base_url: String,
    community_url: String,
    currency: String,
    user_agent: String,
    cookies: Vec<(String, String)>,
    connect_timeout: Duration,
    read_timeout: Duration,
    connect_retries: u32,
    maintenance_marker: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            community_url: DEFAULT_COMMUNITY_URL.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            cookies: Vec::new(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
            connect_retries: DEFAULT_CONNECT_RETRIES,
            maintenance_marker: DEFAULT_MAINTENANCE_MARKER.to_string(),
        }
    }
}

impl Config {
    /// Load from environment variables, falling back to the defaults.
    ///
    /// Fails when a numeric variable does not parse, when the retry bound is
    /// zero, or when the cookie list contains a pair without `=`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut cfg = Self::default();

        if let Ok(v) = env::var(ENV_BASE_URL) {
            cfg.base_url = v;
        }
        if let Ok(v) = env::var(ENV_COMMUNITY_URL) {
            cfg.community_url = v;
        }
        if let Ok(v) = env::var(ENV_CURRENCY) {
            cfg.currency = v;
        }
        if let Ok(v) = env::var(ENV_USER_AGENT) {
            cfg.user_agent = v;
        }
        if let Ok(v) = env::var(ENV_COOKIES) {
            cfg.cookies = parse_cookies(&v)?;
        }
        if let Ok(v) = env::var(ENV_CONNECT_TIMEOUT_SECS) {
            cfg.connect_timeout = Duration::from_secs(parse_number("connect_timeout", &v)?);
        }
        if let Ok(v) = env::var(ENV_READ_TIMEOUT_SECS) {
            cfg.read_timeout = Duration::from_secs(parse_number("read_timeout", &v)?);
        }
        if let Ok(v) = env::var(ENV_CONNECT_RETRIES) {
            let retries = parse_number("connect_retries", &v)?;
            cfg.connect_retries = u32::try_from(retries)
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    field: "connect_retries",
                    reason: format!("expected a positive count, got {retries}"),
                })?;
        }
        if let Ok(v) = env::var(ENV_MAINTENANCE_MARKER) {
            cfg.maintenance_marker = v;
        }

        Ok(cfg)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.push((name.into(), value.into()));
        self
    }

    pub fn with_timeouts(mut self, connect: Duration, read: Duration) -> Self {
        self.connect_timeout = connect;
        self.read_timeout = read;
        self
    }

    pub fn with_connect_retries(mut self, retries: u32) -> Self {
        self.connect_retries = retries;
        self
    }

    pub fn with_maintenance_marker(mut self, marker: impl Into<String>) -> Self {
        self.maintenance_marker = marker.into();
        self
    }

    /// Calculator endpoint; profile pages live under `{base_url}/{steam_id}/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
    /// Prefix of the Steam community profile URL.
    pub fn community_url(&self) -> &str {
        &self.community_url
    }
    /// Currency code sent as the `cc` query parameter.
    pub fn currency(&self) -> &str {
        &self.currency
    }
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
    pub fn cookies(&self) -> &[(String, String)] {
        &self.cookies
    }
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }
    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }
    /// Total number of attempts made by the connectivity check.
    pub fn connect_retries(&self) -> u32 {
        self.connect_retries
    }
    /// Body substring that marks the site's maintenance page as reachable.
    pub fn maintenance_marker(&self) -> &str {
        &self.maintenance_marker
    }

    /// Cookies rendered as a single `Cookie` header value, if any are set.
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        Some(
            self.cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

fn parse_number(field: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidValue {
            field,
            reason: format!("{raw:?}: {e}"),
        })
}

fn parse_cookies(raw: &str) -> Result<Vec<(String, String)>, ConfigError> {
    raw.split(';')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => {
                Ok((name.trim().to_string(), value.trim().to_string()))
            }
            _ => Err(ConfigError::InvalidValue {
                field: "cookies",
                reason: format!("expected name=value, got {pair:?}"),
            }),
        })
        .collect()
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}
