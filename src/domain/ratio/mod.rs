//! Ratio domain — one asset priced in another.
//!
//! Two raw USD series rarely have the same length: the upstream picks the
//! sampling cadence, and a young listing may have fewer points. The series are
//! trimmed to their common trailing length and divided position by position.
//! Pairing is positional, not by timestamp equality, so two series with
//! different cadences can pair samples from different instants.

use crate::domain::price_history::PriceSample;
use crate::error::RatioError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Price of the tracked asset expressed in the reference asset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioPoint {
    pub timestamp: DateTime<Utc>,
    pub ratio: Decimal,
}

/// Derived series; recomputed on every render, never cached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatioSeries(Vec<RatioPoint>);

impl RatioSeries {
    pub fn points(&self) -> &[RatioPoint] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The most recent point, shown as the "current price" readout.
    pub fn latest(&self) -> Option<&RatioPoint> {
        self.0.last()
    }
}

/// The last `n` elements of `samples`.
fn trailing(samples: &[PriceSample], n: usize) -> &[PriceSample] {
    &samples[samples.len() - n..]
}

/// Trim both series to their common trailing length and divide `a` by `b`
/// elementwise, keeping `a`'s timestamps.
///
/// Fails with [`RatioError::Division`] when a trimmed `b` price is zero.
pub fn align_and_divide(a: &[PriceSample], b: &[PriceSample]) -> Result<RatioSeries, RatioError> {
    let n = a.len().min(b.len());
    let (a, b) = (trailing(a, n), trailing(b, n));

    a.iter()
        .zip(b)
        .enumerate()
        .map(|(index, (num, den))| {
            if den.price.is_zero() {
                return Err(RatioError::Division {
                    index,
                    timestamp: den.timestamp,
                    reason: "reference price is zero".into(),
                });
            }
            let ratio = num.price.checked_div(den.price).ok_or_else(|| RatioError::Division {
                index,
                timestamp: den.timestamp,
                reason: "quotient overflows".into(),
            })?;
            Ok(RatioPoint {
                timestamp: num.timestamp,
                ratio,
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(RatioSeries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::str::FromStr;

    fn ts(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 5, 1, hour, 0, 0).unwrap()
    }

    fn series(points: &[(u32, &str)]) -> Vec<PriceSample> {
        points
            .iter()
            .map(|&(h, p)| PriceSample::new(ts(h), Decimal::from_str(p).unwrap()))
            .collect()
    }

    #[test]
    fn test_shorter_numerator_trims_reference() {
        let a = series(&[(1, "100"), (2, "110")]);
        let b = series(&[(1, "10"), (2, "11"), (3, "12")]);

        let out = align_and_divide(&a, &b).unwrap();

        assert_eq!(out.len(), 2);
        assert_eq!(out.points()[0].timestamp, ts(1));
        assert_eq!(out.points()[1].timestamp, ts(2));
        assert_eq!(out.points()[0].ratio, Decimal::from(100) / Decimal::from(11));
        assert_eq!(out.points()[1].ratio, Decimal::from(110) / Decimal::from(12));
        assert_eq!(out.points()[0].ratio.round_dp(2), Decimal::from_str("9.09").unwrap());
        assert_eq!(out.points()[1].ratio.round_dp(2), Decimal::from_str("9.17").unwrap());
    }

    #[test]
    fn test_shorter_reference_trims_numerator() {
        let a = series(&[(1, "4"), (2, "6"), (3, "8"), (4, "10")]);
        let b = series(&[(7, "2"), (8, "4")]);

        let out = align_and_divide(&a, &b).unwrap();

        let stamps: Vec<_> = out.points().iter().map(|p| p.timestamp).collect();
        assert_eq!(stamps, vec![ts(3), ts(4)]);
        let ratios: Vec<_> = out.points().iter().map(|p| p.ratio).collect();
        assert_eq!(ratios, vec![Decimal::from(4), Decimal::from_str("2.5").unwrap()]);
    }

    #[test]
    fn test_output_length_is_min_of_inputs() {
        for (m, n) in [(0usize, 0usize), (0, 3), (3, 0), (1, 5), (5, 1), (4, 4)] {
            let a: Vec<_> = (0..m).map(|h| (h as u32, "3")).collect();
            let b: Vec<_> = (0..n).map(|h| (h as u32, "2")).collect();
            let out = align_and_divide(&series(&a), &series(&b)).unwrap();
            assert_eq!(out.len(), m.min(n), "lengths {m} and {n}");
        }
    }

    #[test]
    fn test_latest_is_last_point() {
        let a = series(&[(1, "1"), (2, "3")]);
        let b = series(&[(1, "2"), (2, "2")]);
        let out = align_and_divide(&a, &b).unwrap();
        let latest = out.latest().unwrap();
        assert_eq!(latest.timestamp, ts(2));
        assert_eq!(latest.ratio, Decimal::from_str("1.5").unwrap());
    }

    #[test]
    fn test_empty_inputs_give_empty_series() {
        let out = align_and_divide(&[], &series(&[(1, "1")])).unwrap();
        assert!(out.is_empty());
        assert!(out.latest().is_none());
    }

    #[test]
    fn test_zero_reference_price_is_division_error() {
        let a = series(&[(1, "1"), (2, "1"), (3, "1")]);
        let b = series(&[(1, "1"), (2, "0"), (3, "1")]);

        let err = align_and_divide(&a, &b).unwrap_err();
        assert!(err.is_division());

        match err {
            RatioError::Division { index, timestamp, .. } => {
                assert_eq!(index, 1);
                assert_eq!(timestamp, ts(2));
            }
            other => panic!("expected division error, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_outside_trimmed_window_is_ignored() {
        let a = series(&[(2, "5")]);
        let b = series(&[(1, "0"), (2, "5")]);
        let out = align_and_divide(&a, &b).unwrap();
        assert_eq!(out.points()[0].ratio, Decimal::ONE);
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let a = series(&[(1, "7.5"), (2, "8.25"), (3, "9")]);
        let b = series(&[(1, "0.3"), (2, "0.33")]);
        let first = align_and_divide(&a, &b).unwrap();
        let second = align_and_divide(&a, &b).unwrap();
        assert_eq!(first, second);
    }
}
