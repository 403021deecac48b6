//! Price history domain — raw USD price series per asset.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use crate::shared::AssetId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single price observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    pub timestamp: DateTime<Utc>,
    pub price: Decimal,
}

impl PriceSample {
    pub fn new(timestamp: DateTime<Utc>, price: Decimal) -> Self {
        Self { timestamp, price }
    }
}

/// Chronologically ordered samples for one asset.
///
/// Timestamps are strictly increasing; conversion from the wire format
/// rejects anything else.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    pub asset: AssetId,
    samples: Vec<PriceSample>,
}

impl PriceSeries {
    pub fn new(asset: AssetId, samples: Vec<PriceSample>) -> Result<Self, ValidationError> {
        if let Some(index) = samples
            .windows(2)
            .position(|w| w[1].timestamp <= w[0].timestamp)
        {
            return Err(ValidationError::NotIncreasing { index: index + 1 });
        }
        Ok(Self { asset, samples })
    }

    pub fn samples(&self) -> &[PriceSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn latest(&self) -> Option<&PriceSample> {
        self.samples.last()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    InvalidTimestamp { index: usize, millis: i64 },
    InvalidPrice { index: usize, price: f64 },
    NotIncreasing { index: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTimestamp { index, millis } => {
                write!(f, "sample {index}: timestamp {millis} out of range")
            }
            Self::InvalidPrice { index, price } => {
                write!(f, "sample {index}: price {price} is not a finite decimal")
            }
            Self::NotIncreasing { index } => {
                write!(f, "sample {index}: timestamp not after the previous sample")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
