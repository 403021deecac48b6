//! Plotly figure JSON for the ratio chart.
//!
//! The page loads plotly.js from its CDN and calls `Plotly.newPlot` with the
//! figure serialized here: one line trace per tracked token.

use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::dashboard::view::TokenRatio;
use crate::shared::fmt::display_timestamp;

pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<LineTrace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineTrace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub mode: &'static str,
    pub name: String,
    pub x: Vec<String>,
    /// `null` for a ratio that does not fit an `f64`.
    pub y: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub margin: Margin,
    pub hovermode: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Axis {
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Margin {
    pub t: u32,
    pub r: u32,
}

impl Figure {
    pub fn from_ratios(ratios: &[TokenRatio], currency_symbol: &str) -> Self {
        let data = ratios
            .iter()
            .map(|r| LineTrace {
                kind: "scatter",
                mode: "lines",
                name: r.token.symbol.clone(),
                x: r
                    .series
                    .points()
                    .iter()
                    .map(|p| display_timestamp(&p.timestamp))
                    .collect(),
                y: r.series.points().iter().map(|p| p.ratio.to_f64()).collect(),
            })
            .collect();

        Self {
            data,
            layout: Layout {
                xaxis: Axis {
                    title: "date".to_string(),
                },
                yaxis: Axis {
                    title: format!("price, {}", currency_symbol.to_lowercase()),
                },
                margin: Margin { t: 24, r: 24 },
                hovermode: "x unified",
            },
        }
    }

    /// JSON safe to inline inside a `<script>` element.
    pub fn to_script_json(&self) -> Result<String, serde_json::Error> {
        Ok(serde_json::to_string(self)?.replace("</", "<\\/"))
    }
}
