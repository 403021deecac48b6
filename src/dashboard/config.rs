use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::client::CoinRatioClient;
use crate::domain::asset::{AssetRegistry, DEFAULT_CURRENCIES, DEFAULT_TOKENS};
use crate::error::RatioError;
use crate::http::RetryPolicy;
use crate::network;

/// Dashboard configuration derived from environment variables.
///
/// Every variable is optional; unparseable numbers fall back to the default.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub bind: String,
    pub port: u16,

    // ── Upstream ───────────────────────────────────────────────────
    pub api_url: String,
    pub cache_ttl: Duration,
    pub http_timeout: Duration,
    /// Extra attempts for failed upstream calls. Zero disables retrying.
    pub http_retries: u32,
    pub lookback_days: u32,

    // ── Selectable assets (`SYMBOL=id,...`) ────────────────────────
    pub tokens: String,
    pub currencies: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8501,
            api_url: network::DEFAULT_API_URL.to_string(),
            cache_ttl: network::DEFAULT_PRICE_CACHE_TTL,
            http_timeout: network::DEFAULT_HTTP_TIMEOUT,
            http_retries: 0,
            lookback_days: network::DEFAULT_LOOKBACK_DAYS,
            tokens: DEFAULT_TOKENS.to_string(),
            currencies: DEFAULT_CURRENCIES.to_string(),
        }
    }
}

fn env_str(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            bind: env_str("COINRATIO_BIND", &d.bind),
            port: env_parse("COINRATIO_PORT", d.port),
            api_url: env_str("COINRATIO_API_URL", &d.api_url),
            cache_ttl: Duration::from_secs(env_parse(
                "COINRATIO_CACHE_TTL_SECS",
                d.cache_ttl.as_secs(),
            )),
            http_timeout: Duration::from_secs(env_parse(
                "COINRATIO_HTTP_TIMEOUT_SECS",
                d.http_timeout.as_secs(),
            )),
            http_retries: env_parse("COINRATIO_HTTP_RETRIES", d.http_retries),
            lookback_days: env_parse("COINRATIO_LOOKBACK_DAYS", d.lookback_days),
            tokens: env_str("COINRATIO_TOKENS", &d.tokens),
            currencies: env_str("COINRATIO_CURRENCIES", &d.currencies),
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, RatioError> {
        format!("{}:{}", self.bind, self.port)
            .parse()
            .map_err(|e| RatioError::Config(format!("invalid bind address: {e}")))
    }

    pub fn registry(&self) -> Result<AssetRegistry, RatioError> {
        AssetRegistry::parse(&self.tokens, &self.currencies)
    }

    pub fn client(&self) -> Result<CoinRatioClient, RatioError> {
        CoinRatioClient::builder()
            .base_url(&self.api_url)
            .price_cache_ttl(self.cache_ttl)
            .timeout(self.http_timeout)
            .retry(RetryPolicy::with_max_retries(self.http_retries))
            .lookback_days(self.lookback_days)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_parse_falls_back_on_garbage() {
        env::set_var("COINRATIO_TEST_GARBAGE_PORT", "eighty");
        assert_eq!(env_parse("COINRATIO_TEST_GARBAGE_PORT", 8501u16), 8501);
        env::set_var("COINRATIO_TEST_GOOD_PORT", " 9000 ");
        assert_eq!(env_parse("COINRATIO_TEST_GOOD_PORT", 8501u16), 9000);
    }

    #[test]
    fn test_env_str_ignores_blank() {
        env::set_var("COINRATIO_TEST_BLANK", "   ");
        assert_eq!(env_str("COINRATIO_TEST_BLANK", "127.0.0.1"), "127.0.0.1");
        assert_eq!(env_str("COINRATIO_TEST_UNSET_VALUE", "x"), "x");
    }

    #[test]
    fn test_default_socket_addr() {
        let addr = DashboardConfig::default().socket_addr().unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:8501");
    }

    #[test]
    fn test_bad_bind_is_config_error() {
        let cfg = DashboardConfig {
            bind: "not an address".into(),
            ..DashboardConfig::default()
        };
        assert!(matches!(cfg.socket_addr(), Err(RatioError::Config(_))));
    }

    #[test]
    fn test_default_registry_and_client() {
        let cfg = DashboardConfig::default();
        assert_eq!(cfg.registry().unwrap(), AssetRegistry::default());
        let client = cfg.client().unwrap();
        assert_eq!(client.price_cache_ttl(), Duration::from_secs(1200));
    }
}
