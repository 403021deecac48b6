//! Conversion: MarketChartResponse → PriceSeries (TryFrom + validation).

use super::wire::{MarketChartResponse, WirePricePoint};
use super::{PriceSample, PriceSeries, ValidationError};
use crate::shared::AssetId;
use chrono::{DateTime, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

/// Upstream timestamps are epoch milliseconds; the sub-second part is dropped.
fn truncate_to_second(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(millis.div_euclid(1000), 0)
}

fn convert_point(index: usize, point: WirePricePoint) -> Result<PriceSample, ValidationError> {
    let WirePricePoint(millis, price) = point;
    let timestamp = truncate_to_second(millis)
        .ok_or(ValidationError::InvalidTimestamp { index, millis })?;
    // Below Decimal's 28-digit scale a non-zero price would read as zero.
    let price = Decimal::from_f64(price)
        .filter(|d| !d.is_zero() || price == 0.0)
        .ok_or(ValidationError::InvalidPrice { index, price })?;
    Ok(PriceSample { timestamp, price })
}

impl TryFrom<(AssetId, MarketChartResponse)> for PriceSeries {
    type Error = ValidationError;

    fn try_from((asset, source): (AssetId, MarketChartResponse)) -> Result<Self, Self::Error> {
        let samples = source
            .prices
            .into_iter()
            .enumerate()
            .map(|(i, p)| convert_point(i, p))
            .collect::<Result<Vec<_>, _>>()?;
        PriceSeries::new(asset, samples)
    }
}
