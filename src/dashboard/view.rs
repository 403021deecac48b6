//! One render pass: selection → fetch → align → view model.
//!
//! The whole page is recomputed from the query string on every request. Only
//! the raw price series are cached (inside `CoinRatioClient`); the ratios are
//! derived fresh each time.

use serde::Serialize;

use crate::client::CoinRatioClient;
use crate::domain::asset::{Asset, AssetRegistry};
use crate::domain::ratio::{align_and_divide, RatioPoint, RatioSeries};
use crate::error::RatioError;

/// What the sidebar controls currently select.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub tokens: Vec<Asset>,
    pub currency: Asset,
}

impl Selection {
    /// Nothing ticked, first currency selected.
    pub fn initial(registry: &AssetRegistry) -> Self {
        Self {
            tokens: Vec::new(),
            currency: registry.default_currency().clone(),
        }
    }

    /// Parse `token=GST&token=GMT&currency=SOL`. Repeated tokens collapse,
    /// a missing or blank currency falls back to the default, other keys are
    /// ignored.
    pub fn from_query(registry: &AssetRegistry, query: Option<&str>) -> Result<Self, RatioError> {
        let pairs: Vec<(String, String)> = match query {
            Some(q) => serde_urlencoded::from_str(q)
                .map_err(|e| RatioError::Selection(e.to_string()))?,
            None => Vec::new(),
        };

        let mut selection = Self::initial(registry);
        for (key, value) in &pairs {
            match key.as_str() {
                "token" => {
                    let token = registry.token(value)?;
                    if !selection.tokens.contains(token) {
                        selection.tokens.push(token.clone());
                    }
                }
                "currency" if !value.trim().is_empty() => {
                    selection.currency = registry.currency(value)?.clone();
                }
                _ => {}
            }
        }
        Ok(selection)
    }

    pub fn is_token_selected(&self, asset: &Asset) -> bool {
        self.tokens.iter().any(|t| t.symbol == asset.symbol)
    }
}

/// Ratio series for one tracked token in the selected currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenRatio {
    pub token: Asset,
    pub currency: Asset,
    pub series: RatioSeries,
}

impl TokenRatio {
    pub fn current(&self) -> Option<&RatioPoint> {
        self.series.latest()
    }
}

/// Main-panel content.
#[derive(Debug, Clone, PartialEq)]
pub enum PageBody {
    /// No token selected.
    Welcome,
    Ratios(Vec<TokenRatio>),
    /// Render pass failed; message shown inline.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub tokens: Vec<Asset>,
    pub currencies: Vec<Asset>,
    pub selection: Selection,
    pub body: PageBody,
}

/// Fetch the reference series once, then each token's series, and divide.
///
/// An empty selection makes no upstream calls.
pub async fn compute_ratios(
    client: &CoinRatioClient,
    selection: &Selection,
) -> Result<Vec<TokenRatio>, RatioError> {
    if selection.tokens.is_empty() {
        return Ok(Vec::new());
    }

    let prices = client.price_history();
    let reference = prices.fetch(&selection.currency.id).await?;

    let mut out = Vec::with_capacity(selection.tokens.len());
    for token in &selection.tokens {
        let series = prices.fetch(&token.id).await?;
        let ratios = align_and_divide(series.samples(), reference.samples())?;
        tracing::debug!(
            token = %token.symbol,
            currency = %selection.currency.symbol,
            token_points = series.len(),
            reference_points = reference.len(),
            ratio_points = ratios.len(),
            "aligned series"
        );
        out.push(TokenRatio {
            token: token.clone(),
            currency: selection.currency.clone(),
            series: ratios,
        });
    }
    Ok(out)
}

/// Full render pass for the HTML page. Never fails: errors become
/// [`PageBody::Failed`].
pub async fn render_pass(
    client: &CoinRatioClient,
    registry: &AssetRegistry,
    query: Option<&str>,
) -> PageView {
    let (selection, body) = match Selection::from_query(registry, query) {
        Err(e) => (Selection::initial(registry), PageBody::Failed(e.to_string())),
        Ok(selection) if selection.tokens.is_empty() => (selection, PageBody::Welcome),
        Ok(selection) => {
            let body = match compute_ratios(client, &selection).await {
                Ok(ratios) => PageBody::Ratios(ratios),
                Err(e) => {
                    tracing::warn!(error = %e, "render pass failed");
                    PageBody::Failed(e.to_string())
                }
            };
            (selection, body)
        }
    };

    PageView {
        tokens: registry.tokens().to_vec(),
        currencies: registry.currencies().to_vec(),
        selection,
        body,
    }
}
