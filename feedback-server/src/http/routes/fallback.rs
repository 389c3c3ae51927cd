//! JSON fallbacks for unmatched paths and methods

use crate::http::error::ApiError;

/// No route matched the path
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// The path matched but not the method
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
