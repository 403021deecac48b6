//! High-level client — `CoinRatioClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, shared cache state, and accessor methods.

use crate::domain::price_history::client::PriceHistoryClient;
use crate::domain::price_history::PriceSeries;
use crate::error::RatioError;
use crate::http::{CoinGeckoHttp, RetryPolicy};
use crate::shared::AssetId;

use async_lock::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub use crate::domain::price_history::client::PriceHistoryClient as PriceHistorySubClient;

/// The primary entry point for fetching price series.
///
/// Cheap to clone; clones share the price cache.
#[derive(Clone)]
pub struct CoinRatioClient {
    pub(crate) http: CoinGeckoHttp,
    /// Price cache: asset id → (series, fetched_at)
    pub(crate) price_cache: Arc<RwLock<HashMap<AssetId, (PriceSeries, Instant)>>>,
    pub(crate) price_cache_ttl: Duration,
    pub(crate) lookback_days: u32,
}

impl CoinRatioClient {
    pub fn builder() -> CoinRatioClientBuilder {
        CoinRatioClientBuilder::default()
    }

    pub fn price_history(&self) -> PriceHistoryClient<'_> {
        PriceHistoryClient { client: self }
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    pub fn price_cache_ttl(&self) -> Duration {
        self.price_cache_ttl
    }

    /// Clear all HTTP caches.
    pub async fn clear_all_caches(&self) {
        self.price_cache.write().await.clear();
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct CoinRatioClientBuilder {
    base_url: String,
    price_cache_ttl: Duration,
    timeout: Duration,
    retry: RetryPolicy,
    lookback_days: u32,
}

impl Default for CoinRatioClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            price_cache_ttl: crate::network::DEFAULT_PRICE_CACHE_TTL,
            timeout: crate::network::DEFAULT_HTTP_TIMEOUT,
            retry: RetryPolicy::None,
            lookback_days: crate::network::DEFAULT_LOOKBACK_DAYS,
        }
    }
}

impl CoinRatioClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn price_cache_ttl(mut self, ttl: Duration) -> Self {
        self.price_cache_ttl = ttl;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn lookback_days(mut self, days: u32) -> Self {
        self.lookback_days = days;
        self
    }

    pub fn build(self) -> Result<CoinRatioClient, RatioError> {
        if self.lookback_days == 0 {
            return Err(RatioError::Config("lookback_days must be at least 1".into()));
        }
        Ok(CoinRatioClient {
            http: CoinGeckoHttp::new(&self.base_url, self.timeout, self.retry)?,
            price_cache: Arc::new(RwLock::new(HashMap::new())),
            price_cache_ttl: self.price_cache_ttl,
            lookback_days: self.lookback_days,
        })
    }
}
