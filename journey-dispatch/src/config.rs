//! Application configuration.
//!
//! Settings come from environment variables. Only the binary reads them;
//! the planner takes no configuration.

use std::net::SocketAddr;
use std::time::Duration;

use crate::dispatch::DispatchConfig;

/// Default address to bind the HTTP server to.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Error returned when an environment value cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value for {var}: {reason}")]
pub struct ConfigError {
    var: &'static str,
    reason: String,
}

impl ConfigError {
    fn new(var: &'static str, reason: impl Into<String>) -> Self {
        Self {
            var,
            reason: reason.into(),
        }
    }
}

/// Top-level configuration for the server binary.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server listens on.
    pub bind_addr: SocketAddr,

    /// Upstream dispatch API settings. `None` runs against the in-memory
    /// mock instead.
    pub dispatch: Option<DispatchConfig>,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Recognised variables:
    ///
    /// * `BIND_ADDR` - listen address (default `127.0.0.1:3000`)
    /// * `DISPATCH_BASE_URL` - dispatch API base URL; unset selects the mock
    /// * `DISPATCH_API_KEY` - required when `DISPATCH_BASE_URL` is set
    /// * `DISPATCH_TIMEOUT_SECS` - request timeout
    /// * `DISPATCH_MAX_CONCURRENT` - concurrent request limit
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_raw
            .parse()
            .map_err(|e| ConfigError::new("BIND_ADDR", format!("{e}")))?;

        let dispatch = match lookup("DISPATCH_BASE_URL").filter(|s| !s.is_empty()) {
            None => None,
            Some(base_url) => {
                let api_key = lookup("DISPATCH_API_KEY")
                    .filter(|s| !s.is_empty())
                    .ok_or_else(|| {
                        ConfigError::new(
                            "DISPATCH_API_KEY",
                            "required when DISPATCH_BASE_URL is set",
                        )
                    })?;

                let mut config = DispatchConfig::new(api_key, base_url);

                if let Some(raw) = lookup("DISPATCH_TIMEOUT_SECS") {
                    let secs = raw
                        .parse::<u64>()
                        .map_err(|e| ConfigError::new("DISPATCH_TIMEOUT_SECS", format!("{e}")))?;
                    config = config.with_timeout(Duration::from_secs(secs));
                }

                if let Some(raw) = lookup("DISPATCH_MAX_CONCURRENT") {
                    let n = raw
                        .parse::<usize>()
                        .map_err(|e| ConfigError::new("DISPATCH_MAX_CONCURRENT", format!("{e}")))?;
                    if n == 0 {
                        return Err(ConfigError::new(
                            "DISPATCH_MAX_CONCURRENT",
                            "must be at least 1",
                        ));
                    }
                    config = config.with_max_concurrent(n);
                }

                Some(config)
            }
        };

        Ok(Self {
            bind_addr,
            dispatch,
        })
    }
}
