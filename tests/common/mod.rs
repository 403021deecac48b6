//! In-process stand-in for the CoinGecko market-chart endpoint.
//!
//! Serves canned bodies per coin id and counts requests so tests can tell a
//! cache hit from a network round-trip.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, RawQuery, State};
use axum::http::header::RETRY_AFTER;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

/// 2022-05-01 00:00:00 UTC in epoch millis.
pub const T0_MS: i64 = 1_651_363_200_000;
pub const HOUR_MS: i64 = 3_600_000;

#[derive(Clone)]
struct Canned {
    status: StatusCode,
    body: String,
    retry_after: Option<String>,
}

#[derive(Default)]
struct MockState {
    responses: Mutex<HashMap<String, Canned>>,
    hits: Mutex<HashMap<String, usize>>,
    queries: Mutex<Vec<String>>,
}

pub struct MockUpstream {
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockUpstream {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new()
            .route("/api/v3/coins/{id}/market_chart", get(market_chart))
            .with_state(Arc::clone(&state));

        let addr = serve(app).await;
        Self {
            base_url: format!("http://{addr}/api/v3"),
            state,
        }
    }

    /// Answer `id` with a `prices` body built from `(offset_hours, price)` pairs.
    pub fn prices(&self, id: &str, points: &[(i64, f64)]) {
        self.respond(id, StatusCode::OK, &prices_body(points));
    }

    pub fn respond(&self, id: &str, status: StatusCode, body: &str) {
        self.canned(id, status, body, None);
    }

    /// Answer `id` with 429 and the given raw `Retry-After` header value.
    pub fn rate_limit(&self, id: &str, retry_after: &str) {
        self.canned(
            id,
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"status":{"error_code":429}}"#,
            Some(retry_after.to_string()),
        );
    }

    fn canned(&self, id: &str, status: StatusCode, body: &str, retry_after: Option<String>) {
        self.state.responses.lock().unwrap().insert(
            id.to_string(),
            Canned {
                status,
                body: body.to_string(),
                retry_after,
            },
        );
    }

    pub fn hits(&self, id: &str) -> usize {
        self.state.hits.lock().unwrap().get(id).copied().unwrap_or(0)
    }

    pub fn total_hits(&self) -> usize {
        self.state.hits.lock().unwrap().values().sum()
    }

    pub fn queries(&self) -> Vec<String> {
        self.state.queries.lock().unwrap().clone()
    }
}

pub fn prices_body(points: &[(i64, f64)]) -> String {
    let prices: Vec<serde_json::Value> = points
        .iter()
        .map(|&(h, p)| serde_json::json!([T0_MS + h * HOUR_MS, p]))
        .collect();
    serde_json::json!({
        "prices": prices,
        "market_caps": [],
        "total_volumes": [],
    })
    .to_string()
}

async fn market_chart(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    RawQuery(query): RawQuery,
) -> Response {
    *state.hits.lock().unwrap().entry(id.clone()).or_insert(0) += 1;
    state.queries.lock().unwrap().push(query.unwrap_or_default());

    let canned = state.responses.lock().unwrap().get(&id).cloned();
    match canned {
        Some(Canned {
            status,
            body,
            retry_after: Some(secs),
        }) => (status, [(RETRY_AFTER, secs)], body).into_response(),
        Some(Canned { status, body, .. }) => (status, body).into_response(),
        None => (StatusCode::NOT_FOUND, r#"{"error":"coin not found"}"#).into_response(),
    }
}

/// Bind an ephemeral port and serve `app` in the background.
pub async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}
