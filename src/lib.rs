//! # coinratio
//!
//! Prices one crypto asset in another over the trailing month and shows the
//! result in a browser dashboard.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core** — Asset registry, price series, ratio alignment (no I/O)
//! 2. **HTTP API** — `CoinGeckoHttp`, one method per upstream endpoint
//! 3. **High-Level Client** — `CoinRatioClient` with the per-asset TTL price cache
//! 4. **Dashboard** — axum routes rendering selection → ratios → chart
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use coinratio::prelude::*;
//!
//! let client = CoinRatioClient::builder().build()?;
//! let gst = client.price_history().fetch(&AssetId::from("green-satoshi-token")).await?;
//! let sol = client.price_history().fetch(&AssetId::from("solana")).await?;
//! let gst_in_sol = align_and_divide(gst.samples(), sol.samples())?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes and display formatting.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, sub-clients.
pub mod domain;

/// Unified error types.
pub mod error;

/// Upstream URL and default constants.
pub mod network;

// ── Layer 2: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 3: High-Level Client ───────────────────────────────────────────────

/// `CoinRatioClient` — the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Layer 4: Dashboard ───────────────────────────────────────────────────────

/// Browser dashboard served with axum.
#[cfg(feature = "server")]
pub mod dashboard;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    pub use crate::shared::AssetId;

    pub use crate::domain::asset::{Asset, AssetRegistry};
    pub use crate::domain::price_history::{PriceSample, PriceSeries};
    pub use crate::domain::ratio::{align_and_divide, RatioPoint, RatioSeries};

    pub use crate::error::{HttpError, RatioError};

    pub use crate::network::{DEFAULT_API_URL, DEFAULT_PRICE_CACHE_TTL};

    #[cfg(feature = "http")]
    pub use crate::client::{CoinRatioClient, CoinRatioClientBuilder, PriceHistorySubClient};
    #[cfg(feature = "http")]
    pub use crate::http::retry::{RetryConfig, RetryPolicy};
}
