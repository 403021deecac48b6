//! Browser dashboard — axum routes over the render pass.
//!
//! - `GET /` — HTML page (sidebar selection, readouts, chart)
//! - `GET /api/ratios` — the same render pass as JSON
//! - `GET /health` — liveness

pub mod chart;
pub mod config;
pub mod error;
pub mod page;
pub mod state;
pub mod view;

use std::sync::Arc;

use axum::extract::{RawQuery, State};
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::DashboardConfig;
pub use error::ApiError;
pub use state::AppState;

use view::Selection;

/// Assemble the dashboard router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(dashboard_page))
        .route("/api/ratios", get(api_ratios))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn dashboard_page(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Html<String> {
    let view = view::render_pass(&state.client, &state.registry, query.as_deref()).await;
    Html(page::render(&view))
}

async fn api_ratios(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Json<Value>, ApiError> {
    let selection = Selection::from_query(&state.registry, query.as_deref())?;
    let ratios = view::compute_ratios(&state.client, &selection).await?;

    let series: Vec<Value> = ratios
        .iter()
        .map(|r| {
            json!({
                "token": r.token.symbol,
                "current": r.current().copied(),
                "points": r.series,
            })
        })
        .collect();

    Ok(Json(json!({
        "currency": selection.currency.symbol,
        "series": series,
    })))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
