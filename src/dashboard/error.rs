use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::error::RatioError;

/// JSON error body for `/api/*` routes. The HTML page never uses this: it
/// renders failures inline instead.
#[derive(Debug)]
pub struct ApiError(pub RatioError);

impl From<RatioError> for ApiError {
    fn from(e: RatioError) -> Self {
        Self(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            RatioError::UnknownAsset(_) | RatioError::Selection(_) => StatusCode::BAD_REQUEST,
            RatioError::Network(_) | RatioError::DataFormat(_) => StatusCode::BAD_GATEWAY,
            RatioError::Division { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            RatioError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match &self.0 {
            RatioError::Network(_) => "network_error",
            RatioError::DataFormat(_) => "data_format_error",
            RatioError::Division { .. } => "division_error",
            RatioError::UnknownAsset(_) => "unknown_asset",
            RatioError::Selection(_) => "invalid_selection",
            RatioError::Config(_) => "config_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({ "error": self.kind(), "message": self.0.to_string() });
        (self.status(), axum::Json(body)).into_response()
    }
}
