//! Price history sub-client — market-chart fetches behind a TTL cache.

use super::PriceSeries;
use crate::client::CoinRatioClient;
use crate::error::RatioError;
use crate::network::VS_CURRENCY;
use crate::shared::AssetId;
use std::time::Instant;

/// Sub-client for price history operations.
pub struct PriceHistoryClient<'a> {
    pub(crate) client: &'a CoinRatioClient,
}

impl<'a> PriceHistoryClient<'a> {
    /// Trailing USD price series for `asset`. Uses TTL cache.
    ///
    /// Failed fetches are not cached; the next call goes back to the network.
    pub async fn fetch(&self, asset: &AssetId) -> Result<PriceSeries, RatioError> {
        if let Some(series) = self.cached(asset).await {
            tracing::debug!(%asset, "price cache hit");
            return Ok(series);
        }

        tracing::info!(%asset, days = self.client.lookback_days, "fetching market chart");
        let resp = self
            .client
            .http
            .get_market_chart(asset, VS_CURRENCY, self.client.lookback_days)
            .await?;

        let series = PriceSeries::try_from((asset.clone(), resp))
            .map_err(|e| RatioError::DataFormat(format!("{asset}: {e}")))?;

        self.client
            .price_cache
            .write()
            .await
            .insert(asset.clone(), (series.clone(), Instant::now()));
        Ok(series)
    }

    /// Cached series for `asset` if it is still within the TTL.
    pub async fn cached(&self, asset: &AssetId) -> Option<PriceSeries> {
        let cache = self.client.price_cache.read().await;
        let (series, fetched_at) = cache.get(asset)?;
        (fetched_at.elapsed() < self.client.price_cache_ttl).then(|| series.clone())
    }

    /// Drop the cached series for one asset.
    pub async fn invalidate(&self, asset: &AssetId) {
        self.client.price_cache.write().await.remove(asset);
    }
}
