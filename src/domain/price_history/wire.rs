//! Wire types for the CoinGecko market-chart endpoint.

use serde::{Deserialize, Serialize};

/// `GET /coins/{id}/market_chart` response body.
///
/// Only `prices` is consumed; `market_caps` and `total_volumes` are ignored.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct MarketChartResponse {
    pub prices: Vec<WirePricePoint>,
}

/// One `[timestamp_ms, price]` pair.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct WirePricePoint(pub i64, pub f64);
