use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::provider::ProviderError;

/// Every way a request can fail. Each maps to exactly one status code.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("Weather record not found")]
    NotFound,
    #[error("Weather provider unavailable")]
    Upstream(#[from] ProviderError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Upstream(cause) = &self {
            tracing::warn!(error = %cause, "weather provider request failed");
        }
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
