//! Retry policies for upstream requests.

use std::time::Duration;

use crate::error::HttpError;

/// Retry policy for an HTTP request.
#[derive(Debug, Clone, Default)]
pub enum RetryPolicy {
    /// Single attempt; failures go straight to the caller.
    #[default]
    None,
    /// Retry on transport failures, 429 and 502/503/504 with the default backoff.
    Idempotent,
    /// User-provided retry logic.
    Custom(RetryConfig),
}

impl RetryPolicy {
    /// Policy for `max_retries` extra attempts on top of the first one.
    /// Zero disables retrying.
    pub fn with_max_retries(max_retries: u32) -> Self {
        if max_retries == 0 {
            return RetryPolicy::None;
        }
        RetryPolicy::Custom(RetryConfig {
            max_retries,
            ..RetryConfig::idempotent()
        })
    }

    /// Resolved config, or `None` when the request must not be retried.
    pub(crate) fn config(&self) -> Option<RetryConfig> {
        match self {
            RetryPolicy::None => None,
            RetryPolicy::Idempotent => Some(RetryConfig::idempotent()),
            RetryPolicy::Custom(c) => Some(c.clone()),
        }
    }
}

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (not counting the initial request).
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    /// Multiplier applied to the delay after each retry.
    pub backoff_factor: f64,
    /// Spread each delay by ±25%.
    pub jitter: bool,
    /// HTTP status codes that trigger a retry.
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::idempotent()
    }
}

impl RetryConfig {
    /// CoinGecko's public tier answers bursts with 429, so it is retryable too.
    pub fn idempotent() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            backoff_factor: 2.0,
            jitter: true,
            retryable_statuses: vec![429, 502, 503, 504],
        }
    }

    pub fn is_retryable_status(&self, status: u16) -> bool {
        self.retryable_statuses.contains(&status)
    }

    /// Transport failures and the configured statuses are retried; anything
    /// else (404, other 4xx, a body that fails to decode) is final.
    pub fn should_retry(&self, err: &HttpError) -> bool {
        match err {
            HttpError::ServerError { status, .. } => self.is_retryable_status(*status),
            HttpError::RateLimited { .. } => self.is_retryable_status(429),
            HttpError::Reqwest(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            _ => false,
        }
    }

    /// Wait before retry number `attempt` after `err`. A `Retry-After` hint
    /// replaces the backoff but is capped at `max_delay`.
    pub fn delay_after(&self, attempt: u32, err: &HttpError) -> Duration {
        match err {
            HttpError::RateLimited {
                retry_after: Some(hint),
            } => (*hint).min(self.max_delay),
            _ => self.delay_for_attempt(attempt),
        }
    }

    /// Delay before retry number `attempt` (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base = self.initial_delay.as_millis() as f64
            * self.backoff_factor.powi(attempt as i32);
        let capped = base.min(self.max_delay.as_millis() as f64);

        let final_ms = if self.jitter {
            let spread = capped * 0.25;
            (capped + (rand::random::<f64>() - 0.5) * 2.0 * spread).max(0.0)
        } else {
            capped
        };

        Duration::from_millis(final_ms as u64)
    }
}
