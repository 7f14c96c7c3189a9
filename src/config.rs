//! Client configuration with defaults and environment overrides.
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `MOTION_BASE_URL` | `base_url` | `http://localhost:8080` |
//! | `MOTION_HTTP_TIMEOUT_MS` | `timeout` | 10000 |
//! | `MOTION_RETRY_BASE_DELAY_MS` | `retry_base_delay` | 1000 |
//! | `MOTION_HTTP_POOL_MAX_IDLE_PER_HOST` | `pool_max_idle_per_host` | 8 |
//! | `MOTION_PROXY_URL` | `proxy_url` | none |

use crate::error_code::StatusCode;
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// One retry total on a transient status.
pub const DEFAULT_MAX_RETRIES: u32 = 1;
pub const DEFAULT_RETRY_BASE_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Daemon origin; endpoints such as `/0/api/config` are resolved against it.
    pub base_url: String,
    /// Wall-clock limit for one network attempt, including reading the body.
    pub timeout: Duration,
    pub max_retries: u32,
    /// Backoff before retry `n` (0-based) is `retry_base_delay * (n + 1)`.
    pub retry_base_delay: Duration,
    /// Statuses retried after backoff. Defaults to the retryable [`StatusCode`]s.
    pub retryable_statuses: Vec<u16>,
    pub pool_max_idle_per_host: usize,
    pub proxy_url: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_base_delay: DEFAULT_RETRY_BASE_DELAY,
            retryable_statuses: StatusCode::retryable_statuses(),
            pool_max_idle_per_host: 8,
            proxy_url: None,
        }
    }
}

impl ClientConfig {
    /// Defaults, overridden by any `MOTION_*` variables that are set and parse.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("MOTION_BASE_URL").unwrap_or(defaults.base_url),
            timeout: env_parse::<u64>("MOTION_HTTP_TIMEOUT_MS")
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(defaults.timeout),
            retry_base_delay: env_parse::<u64>("MOTION_RETRY_BASE_DELAY_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.retry_base_delay),
            pool_max_idle_per_host: env_parse("MOTION_HTTP_POOL_MAX_IDLE_PER_HOST")
                .unwrap_or(defaults.pool_max_idle_per_host),
            proxy_url: env::var("MOTION_PROXY_URL").ok().filter(|s| !s.is_empty()),
            ..defaults
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse::<T>().ok())
}
