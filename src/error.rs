//! Unified error types.

use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Top-level error for fetching, aligning and rendering price ratios.
#[derive(Error, Debug)]
pub enum RatioError {
    /// Upstream unreachable or answered with a non-success status.
    #[error("Network error: {0}")]
    Network(HttpError),

    /// Upstream answered, but not with the expected JSON shape.
    #[error("Data format error: {0}")]
    DataFormat(String),

    /// A reference price in the aligned window was zero (or the quotient overflowed).
    #[error("Division error at index {index} ({timestamp}): {reason}")]
    Division {
        index: usize,
        timestamp: DateTime<Utc>,
        reason: String,
    },

    #[error("Unknown asset: {0}")]
    UnknownAsset(String),

    #[error("Invalid selection: {0}")]
    Selection(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl RatioError {
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    pub fn is_data_format(&self) -> bool {
        matches!(self, Self::DataFormat(_))
    }

    pub fn is_division(&self) -> bool {
        matches!(self, Self::Division { .. })
    }
}

impl From<HttpError> for RatioError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::Decode(msg) => Self::DataFormat(msg),
            other => Self::Network(other),
        }
    }
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    /// `retry_after` is the upstream's `Retry-After` hint, unclamped.
    #[error("Rate limited (retry after {retry_after:?})")]
    RateLimited { retry_after: Option<Duration> },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid response body: {0}")]
    Decode(String),
}
