//! Client configuration parsed from environment variables.

use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_HISTORY_PAGE_SIZE: u32 = 10;

/// Errors produced while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but its value does not parse.
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root including the `/api` prefix, without a trailing slash.
    pub base_url: String,
    pub connect_timeout: Option<Duration>,
    /// Whole-request timeout. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
    /// Cookie string (`name=value`) seeded into the jar before the first call.
    pub session_cookie: Option<String>,
    pub history_page_size: u32,
}

impl ClientConfig {
    /// Config for `base_url` with every other setting at its default.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            connect_timeout: None,
            request_timeout: None,
            session_cookie: None,
            history_page_size: DEFAULT_HISTORY_PAGE_SIZE,
        }
    }

    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `ROADMAP_API_BASE_URL`: default `http://localhost:5000/api`
    /// - `ROADMAP_CONNECT_TIMEOUT_SECS`: unset means no connect timeout
    /// - `ROADMAP_REQUEST_TIMEOUT_SECS`: unset means no request timeout
    /// - `ROADMAP_SESSION_COOKIE`: e.g. `session=...` from a previous login
    /// - `ROADMAP_HISTORY_PAGE_SIZE`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a numeric variable is set
    /// but not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("ROADMAP_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_owned());
        let connect_timeout = env_parse_u64("ROADMAP_CONNECT_TIMEOUT_SECS")?.map(Duration::from_secs);
        let request_timeout = env_parse_u64("ROADMAP_REQUEST_TIMEOUT_SECS")?.map(Duration::from_secs);
        let session_cookie = std::env::var("ROADMAP_SESSION_COOKIE")
            .ok()
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty());
        let history_page_size = match env_parse_u64("ROADMAP_HISTORY_PAGE_SIZE")? {
            Some(size) => u32::try_from(size).map_err(|_| ConfigError::InvalidValue {
                var: "ROADMAP_HISTORY_PAGE_SIZE",
                value: size.to_string(),
            })?,
            None => DEFAULT_HISTORY_PAGE_SIZE,
        };

        Ok(Self {
            base_url: normalize_base_url(&base_url),
            connect_timeout,
            request_timeout,
            session_cookie,
            history_page_size,
        })
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

fn env_parse_u64(var: &'static str) -> Result<Option<u64>, ConfigError> {
    let Ok(raw) = std::env::var(var) else {
        return Ok(None);
    };
    match raw.trim().parse::<u64>() {
        Ok(value) if value > 0 => Ok(Some(value)),
        _ => Err(ConfigError::InvalidValue { var, value: raw }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
