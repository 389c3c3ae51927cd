//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.

use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::StoreError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Body could not be read (status chosen by axum, e.g. 413)
    Body(BytesRejection),

    /// Storage call failed (500, driver text included as `details`)
    Storage {
        error: &'static str,
        source: StoreError,
    },

    /// No route matches the path (404)
    NotFound,

    /// Route exists but not for this method (405)
    MethodNotAllowed,

    /// Anything unexpected (500, no detail leaked)
    Internal,
}

impl ApiError {
    /// Storage failure while listing feedback
    pub fn list_failed(source: StoreError) -> Self {
        Self::Storage {
            error: "Failed to retrieve feedback",
            source,
        }
    }

    /// Storage failure while creating feedback
    pub fn create_failed(source: StoreError) -> Self {
        Self::Storage {
            error: "Failed to create feedback",
            source,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Body(rejection) => {
                return (rejection.status(), Json(json!({ "error": rejection.body_text() })))
                    .into_response();
            }
            Self::Validation(e) => (StatusCode::BAD_REQUEST, json!({ "error": e.to_string() })),
            Self::Storage { error, source } => {
                tracing::error!(error = %source, "{}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": error,
                        "details": source.to_string()
                    }),
                )
            }
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "Endpoint not found",
                    "message": "The requested resource does not exist"
                }),
            ),
            Self::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                json!({
                    "error": "Method not allowed",
                    "message": "The HTTP method used is not supported for this endpoint"
                }),
            ),
            Self::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Internal server error",
                    "message": "An unexpected error occurred"
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = ApiError::Validation(ValidationError::Empty { field: "Name" });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "error": "Name cannot be empty" }));
    }

    #[tokio::test]
    async fn storage_error_is_500_with_details() {
        let err = ApiError::create_failed(StoreError::Sqlx(sqlx::Error::PoolClosed));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Failed to create feedback");
        assert_eq!(body["details"], sqlx::Error::PoolClosed.to_string());
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "Endpoint not found");
    }

    #[tokio::test]
    async fn method_not_allowed_is_405() {
        let response = ApiError::MethodNotAllowed.into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body_json(response).await["error"], "Method not allowed");
    }

    #[tokio::test]
    async fn internal_error_hides_details() {
        let response = ApiError::Internal.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Internal server error");
        assert!(body.get("details").is_none());
    }
}
