//! API Error Types
//!
//! Defines error types for the API layer and implements conversion
//! to HTTP responses with appropriate status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::dashboard::DashboardError;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Dashboard component failed
    #[error(transparent)]
    Dashboard(#[from] DashboardError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Dashboard(DashboardError::Fetch(_)) => {
                (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR")
            }
            ApiError::Dashboard(DashboardError::NotSelectable(_)) => {
                (StatusCode::BAD_REQUEST, "NOT_SELECTABLE")
            }
            ApiError::Dashboard(DashboardError::MissingElement(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "LAYOUT_ERROR")
            }
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let request_id = uuid::Uuid::new_v4().to_string();

        tracing::error!(
            request_id = %request_id,
            error_code = %code,
            error_message = %self,
            "API error occurred"
        );

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::covid::FetchError;
    use crate::dom::NodeId;

    #[test]
    fn test_status_mapping() {
        let err = ApiError::from(DashboardError::Fetch(FetchError::Timeout));
        assert_eq!(err.status_and_code().0, StatusCode::BAD_GATEWAY);

        let err = ApiError::from(DashboardError::NotSelectable(NodeId(3)));
        assert_eq!(err.status_and_code(), (StatusCode::BAD_REQUEST, "NOT_SELECTABLE"));

        let err = ApiError::NotFound("summary".to_string());
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
