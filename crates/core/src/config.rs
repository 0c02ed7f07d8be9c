//! Ward runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into services. Helpers in
//! this module take already-read values so that nothing here touches the process environment.

use crate::constants::{DEFAULT_API_TIMEOUT_SECS, DEFAULT_API_URL, DEFAULT_WEB_ADDR};
use crate::{WardError, WardResult};
use std::time::Duration;

/// Configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct WardConfig {
    api_base_url: String,
    listen_addr: String,
    api_timeout: Duration,
}

impl WardConfig {
    /// Create a new `WardConfig`.
    ///
    /// The API base URL must be an `http` or `https` URL; a trailing slash is dropped so that
    /// endpoint paths can be appended directly.
    pub fn new(
        api_base_url: impl Into<String>,
        listen_addr: impl Into<String>,
        api_timeout: Duration,
    ) -> WardResult<Self> {
        let api_base_url = api_base_url.into().trim().trim_end_matches('/').to_string();
        if api_base_url.is_empty() {
            return Err(WardError::InvalidConfig(
                "WARD_API_URL cannot be empty".into(),
            ));
        }
        if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
            return Err(WardError::InvalidConfig(format!(
                "WARD_API_URL must start with http:// or https:// (got {api_base_url})"
            )));
        }

        let listen_addr = listen_addr.into().trim().to_string();
        if listen_addr.is_empty() {
            return Err(WardError::InvalidConfig("WARD_ADDR cannot be empty".into()));
        }

        if api_timeout.is_zero() {
            return Err(WardError::InvalidConfig(
                "WARD_API_TIMEOUT_SECS must be greater than zero".into(),
            ));
        }

        Ok(Self {
            api_base_url,
            listen_addr,
            api_timeout,
        })
    }

    /// Build a configuration from optional raw values, applying defaults for missing ones.
    pub fn from_values(
        api_base_url: Option<String>,
        listen_addr: Option<String>,
        api_timeout_secs: Option<String>,
    ) -> WardResult<Self> {
        Self::new(
            non_blank(api_base_url).unwrap_or_else(|| DEFAULT_API_URL.into()),
            non_blank(listen_addr).unwrap_or_else(|| DEFAULT_WEB_ADDR.into()),
            api_timeout_from_env_value(api_timeout_secs)?,
        )
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    pub fn api_timeout(&self) -> Duration {
        self.api_timeout
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the backend request timeout from an optional string value (whole seconds).
///
/// If `value` is `None` or empty/whitespace, returns the default timeout.
pub fn api_timeout_from_env_value(value: Option<String>) -> WardResult<Duration> {
    match non_blank(value) {
        None => Ok(Duration::from_secs(DEFAULT_API_TIMEOUT_SECS)),
        Some(v) => v.parse::<u64>().map(Duration::from_secs).map_err(|_| {
            WardError::InvalidConfig(format!(
                "WARD_API_TIMEOUT_SECS must be a whole number of seconds (got {v})"
            ))
        }),
    }
}
