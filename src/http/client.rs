//! Low-level HTTP client — `CoinGeckoHttp`.
//!
//! One method per upstream endpoint. Returns wire types (conversion to domain
//! types happens in the sub-clients). Internal to the crate — `CoinRatioClient`
//! wraps this.

use crate::domain::price_history::wire::MarketChartResponse;
use crate::error::HttpError;
use crate::http::retry::RetryPolicy;
use crate::shared::AssetId;

use reqwest::header::RETRY_AFTER;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Low-level HTTP client for the CoinGecko REST API.
#[derive(Clone)]
pub struct CoinGeckoHttp {
    base_url: String,
    client: Client,
    retry: RetryPolicy,
}

impl CoinGeckoHttp {
    pub fn new(base_url: &str, timeout: Duration, retry: RetryPolicy) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(4)
            .user_agent(concat!("coinratio/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            retry,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Market chart ─────────────────────────────────────────────────────

    pub async fn get_market_chart(
        &self,
        asset: &AssetId,
        vs_currency: &str,
        days: u32,
    ) -> Result<MarketChartResponse, HttpError> {
        let url = format!(
            "{}/coins/{}/market_chart?vs_currency={}&days={}",
            self.base_url,
            urlencoding::encode(asset.as_str()),
            vs_currency,
            days
        );
        self.get(&url).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    /// GET `url` as JSON, retrying under the configured policy.
    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let config = self.retry.config();
        let mut attempt = 0;
        loop {
            let err = match self.get_once::<T>(url).await {
                Ok(body) => return Ok(body),
                Err(e) => e,
            };
            let config = match &config {
                Some(c) if attempt < c.max_retries && c.should_retry(&err) => c,
                _ => return Err(err),
            };

            let delay = config.delay_after(attempt, &err);
            tracing::debug!(
                attempt = attempt + 1,
                max = config.max_retries,
                delay_ms = delay.as_millis() as u64,
                error = %err,
                %url,
                "retrying upstream request"
            );
            futures_timer::Delay::new(delay).await;
            attempt += 1;
        }
    }

    async fn get_once<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();

        if status.is_success() {
            let body = resp.text().await?;
            return serde_json::from_str::<T>(&body).map_err(|e| HttpError::Decode(e.to_string()));
        }

        let status_code = status.as_u16();
        // Only the delta-seconds form; an HTTP-date hint is ignored.
        let retry_after = resp
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs);
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            404 => Err(HttpError::NotFound(body_text)),
            429 => Err(HttpError::RateLimited { retry_after }),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}
