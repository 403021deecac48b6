use std::sync::Arc;

use crate::client::CoinRatioClient;
use crate::dashboard::config::DashboardConfig;
use crate::domain::asset::AssetRegistry;
use crate::error::RatioError;

/// Shared application state, passed to all route handlers via `axum::extract::State`.
pub struct AppState {
    /// Holds the process-wide price cache; every render pass goes through it.
    pub client: CoinRatioClient,
    pub registry: AssetRegistry,
}

impl AppState {
    pub fn new(config: &DashboardConfig) -> Result<Arc<Self>, RatioError> {
        Ok(Arc::new(Self {
            client: config.client()?,
            registry: config.registry()?,
        }))
    }
}
