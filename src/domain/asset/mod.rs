//! Asset registry — display symbols mapped to upstream identifiers.
//!
//! Two lists: the tracked tokens a user may chart, and the reference
//! currencies a token may be priced in. Symbols are matched
//! case-insensitively; the first currency is the default selection.

use crate::error::RatioError;
use crate::shared::AssetId;
use serde::Serialize;

/// A selectable asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Asset {
    /// Display symbol, e.g. `GST`.
    pub symbol: String,
    /// Upstream identifier, e.g. `green-satoshi-token`.
    pub id: AssetId,
}

impl Asset {
    pub fn new(symbol: &str, id: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            id: AssetId::from(id),
        }
    }
}

pub const DEFAULT_TOKENS: &str = "GST=green-satoshi-token,GMT=stepn,SOL=solana";
pub const DEFAULT_CURRENCIES: &str = "SOL=solana,USDT=tether";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRegistry {
    tokens: Vec<Asset>,
    currencies: Vec<Asset>,
}

impl Default for AssetRegistry {
    fn default() -> Self {
        Self {
            tokens: vec![
                Asset::new("GST", "green-satoshi-token"),
                Asset::new("GMT", "stepn"),
                Asset::new("SOL", "solana"),
            ],
            currencies: vec![Asset::new("SOL", "solana"), Asset::new("USDT", "tether")],
        }
    }
}

impl AssetRegistry {
    pub fn new(tokens: Vec<Asset>, currencies: Vec<Asset>) -> Result<Self, RatioError> {
        if currencies.is_empty() {
            return Err(RatioError::Config(
                "at least one reference currency is required".into(),
            ));
        }
        for (kind, list) in [("token", &tokens), ("currency", &currencies)] {
            for (i, a) in list.iter().enumerate() {
                if list[..i]
                    .iter()
                    .any(|b| b.symbol.eq_ignore_ascii_case(&a.symbol))
                {
                    return Err(RatioError::Config(format!(
                        "duplicate {kind} symbol: {}",
                        a.symbol
                    )));
                }
            }
        }
        Ok(Self { tokens, currencies })
    }

    /// Build from `SYMBOL=id,SYMBOL=id` lists.
    pub fn parse(tokens: &str, currencies: &str) -> Result<Self, RatioError> {
        Self::new(parse_asset_list(tokens)?, parse_asset_list(currencies)?)
    }

    pub fn tokens(&self) -> &[Asset] {
        &self.tokens
    }

    pub fn currencies(&self) -> &[Asset] {
        &self.currencies
    }

    pub fn default_currency(&self) -> &Asset {
        &self.currencies[0]
    }

    pub fn token(&self, symbol: &str) -> Result<&Asset, RatioError> {
        find(&self.tokens, symbol)
    }

    pub fn currency(&self, symbol: &str) -> Result<&Asset, RatioError> {
        find(&self.currencies, symbol)
    }
}

fn find<'a>(list: &'a [Asset], symbol: &str) -> Result<&'a Asset, RatioError> {
    let symbol = symbol.trim();
    list.iter()
        .find(|a| a.symbol.eq_ignore_ascii_case(symbol))
        .ok_or_else(|| RatioError::UnknownAsset(symbol.to_string()))
}

/// Parse `GST=green-satoshi-token,GMT=stepn`. Symbols are upper-cased.
pub fn parse_asset_list(raw: &str) -> Result<Vec<Asset>, RatioError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (symbol, id) = entry
                .split_once('=')
                .map(|(s, i)| (s.trim(), i.trim()))
                .filter(|(s, i)| !s.is_empty() && !i.is_empty())
                .ok_or_else(|| {
                    RatioError::Config(format!("expected SYMBOL=id, got {entry:?}"))
                })?;
            Ok(Asset::new(&symbol.to_ascii_uppercase(), id))
        })
        .collect()
}
