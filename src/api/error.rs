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

use crate::backend::BackendError;
use crate::locale::LocaleError;
use crate::utils::ValidationError;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Hosted backend error
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Localization error
    #[error("Locale error: {0}")]
    Locale(#[from] LocaleError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.to_string())
    }
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
            ApiError::Backend(e) if e.is_connection() => {
                (StatusCode::SERVICE_UNAVAILABLE, "BACKEND_UNAVAILABLE")
            }
            ApiError::Backend(_) => (StatusCode::BAD_GATEWAY, "BACKEND_ERROR"),
            ApiError::Locale(LocaleError::UnsupportedLanguage(_)) => {
                (StatusCode::BAD_REQUEST, "UNSUPPORTED_LANGUAGE")
            }
            ApiError::Locale(_) => (StatusCode::INTERNAL_SERVER_ERROR, "LOCALE_ERROR"),
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

    #[test]
    fn test_backend_errors_map_by_kind() {
        let unreachable = ApiError::from(BackendError::Connection("refused".into()));
        assert_eq!(unreachable.status_and_code().0, StatusCode::SERVICE_UNAVAILABLE);

        let rejected = ApiError::from(BackendError::Query {
            status: 409,
            message: "duplicate key".into(),
        });
        assert_eq!(rejected.status_and_code(), (StatusCode::BAD_GATEWAY, "BACKEND_ERROR"));
    }

    #[test]
    fn test_backend_not_found_is_gateway_error() {
        // A 404 from the backend means a missing table or route, not a missing
        // resource of this API
        let err = ApiError::from(BackendError::Query {
            status: 404,
            message: "relation \"public.roles\" does not exist".into(),
        });
        assert_eq!(err.status_and_code(), (StatusCode::BAD_GATEWAY, "BACKEND_ERROR"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_unsupported_language_is_client_error() {
        let err = ApiError::from(LocaleError::UnsupportedLanguage("fr".into()));
        assert_eq!(err.status_and_code().0, StatusCode::BAD_REQUEST);

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
