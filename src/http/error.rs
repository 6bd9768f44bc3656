//! Client-facing errors.
//!
//! Rendered as `{"statusCode": 400, "message": "...", "error": "Bad Request"}`.

use axum::{
    extract::OriginalUri,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// An error returned to the client in place of a handler response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(message) | ApiError::NotFound(message) => message,
        }
    }
}

/// Wire shape of an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    pub message: String,
    pub error: String,
}

impl From<&ApiError> for ErrorBody {
    fn from(err: &ApiError) -> Self {
        let status = err.status();
        Self {
            status_code: status.as_u16(),
            message: err.message().to_string(),
            error: status.canonical_reason().unwrap_or("Error").to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::debug!(status = %self.status(), message = %self.message(), "Request rejected");
        (self.status(), Json(ErrorBody::from(&self))).into_response()
    }
}

/// Fallback for requests that match no route.
///
/// Reports the URL as the client sent it, query string included.
pub async fn not_found(method: Method, OriginalUri(uri): OriginalUri) -> ApiError {
    let target = uri
        .path_and_query()
        .map_or_else(|| uri.path(), |pq| pq.as_str());
    ApiError::NotFound(format!("Cannot {} {}", method, target))
}
