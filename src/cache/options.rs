use std::time::Duration;

use crate::config::CacheConfig;

/// Per-hook revalidation policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Observations closer than this to the last request start reuse it.
    pub dedupe_interval: Duration,
    pub error_retry_count: u32,
    pub error_retry_interval: Duration,
    /// A 404 settles as `{}` instead of an error.
    pub not_found_as_empty: bool,
    /// Off for every hook in the dashboard.
    pub revalidate_on_focus: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            dedupe_interval: Duration::from_secs(60),
            error_retry_count: 0,
            error_retry_interval: Duration::from_secs(5),
            not_found_as_empty: false,
            revalidate_on_focus: false,
        }
    }
}

impl FetchOptions {
    /// Dedupe window from config, no retries.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self {
            dedupe_interval: Duration::from_secs(config.dedupe_interval_seconds),
            error_retry_count: 0,
            error_retry_interval: Duration::from_secs(config.error_retry_interval_seconds),
            not_found_as_empty: false,
            revalidate_on_focus: false,
        }
    }

    /// Same policy, with the configured retry budget enabled.
    pub fn with_retries(mut self, config: &CacheConfig) -> Self {
        self.error_retry_count = config.error_retry_count;
        self.error_retry_interval = Duration::from_secs(config.error_retry_interval_seconds);
        self
    }

    pub fn treat_not_found_as_empty(mut self) -> Self {
        self.not_found_as_empty = true;
        self
    }

    pub(crate) fn dedupe_millis(&self) -> i64 {
        i64::try_from(self.dedupe_interval.as_millis()).unwrap_or(i64::MAX)
    }
}
