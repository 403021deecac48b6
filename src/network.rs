//! Upstream URL and default constants.

use std::time::Duration;

/// Default CoinGecko REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Quote currency every raw series is fetched in.
pub const VS_CURRENCY: &str = "usd";

/// Trailing window requested from the market-chart endpoint.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 30;

/// How long a fetched price series stays fresh.
pub const DEFAULT_PRICE_CACHE_TTL: Duration = Duration::from_secs(20 * 60);

/// Outbound request timeout.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);
