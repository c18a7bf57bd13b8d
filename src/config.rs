use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::api::retry::{RetryPolicy, RetryScope};
use crate::error::{AnalyticsError, Result};

/// Base URL used when no environment override is present (local API behind the dev proxy)
pub const DEVELOPMENT_BASE_URL: &str = "http://localhost:8000/api";

/// Path prefix the API is served under in production
pub const PRODUCTION_PREFIX: &str = "/api";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEVELOPMENT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry: RetryPolicy::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let base_url = match lookup("ANALYTICS_API_URL") {
            Some(url) => url,
            None => match lookup("APP_ENV").as_deref() {
                Some("production") => {
                    let origin = lookup("ANALYTICS_ORIGIN").ok_or_else(|| {
                        AnalyticsError::ConfigError(
                            "ANALYTICS_ORIGIN is required when APP_ENV=production".to_string(),
                        )
                    })?;
                    format!("{}{}", origin.trim_end_matches('/'), PRODUCTION_PREFIX)
                }
                _ => defaults.base_url,
            },
        };
        let base_url = base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(AnalyticsError::ConfigError(format!(
                "API base URL must be absolute: '{}'",
                base_url
            )));
        }

        let max_attempts = parse_var::<_, u32>(&lookup, "RETRY_MAX_ATTEMPTS")?
            .unwrap_or(defaults.retry.max_attempts);
        let base_delay = parse_var(&lookup, "RETRY_BASE_DELAY_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.retry.base_delay);
        let timeout = parse_var(&lookup, "REQUEST_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        let scope = match lookup("RETRY_TRANSIENT_ONLY").as_deref().map(str::trim) {
            None | Some("") | Some("0") | Some("false") => RetryScope::All,
            Some("1") | Some("true") => RetryScope::TransientOnly,
            Some(other) => {
                return Err(AnalyticsError::ConfigError(format!(
                    "RETRY_TRANSIENT_ONLY must be true or false, got '{}'",
                    other
                )));
            }
        };

        Ok(Self {
            base_url,
            timeout,
            retry: RetryPolicy::new(max_attempts, base_delay).with_scope(scope),
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|_| {
                AnalyticsError::ConfigError(format!(
                    "{} must be a non-negative integer in range, got '{}'",
                    key, raw
                ))
            })
        })
        .transpose()
}
