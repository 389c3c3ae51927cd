//! Custom Axum extractors

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;

use super::error::ApiError;
use crate::models::{FeedbackPayload, NewFeedback};

/// Extract and validate a feedback submission from the request body.
///
/// Content type is not checked; any body that parses as a JSON object is
/// accepted.
pub struct ValidFeedback(pub NewFeedback);

impl<S> FromRequest<S> for ValidFeedback
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(ApiError::Body)?;

        let payload = FeedbackPayload::from_slice(&body)?;
        Ok(Self(NewFeedback::try_from(payload)?))
    }
}

/// Extract a non-negative integer id from the path.
///
/// Anything else, including values past `u64::MAX`, does not match the
/// route and is reported as 404.
pub struct FeedbackId(pub u64);

impl<S> FromRequestParts<S> for FeedbackId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound)?;

        if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ApiError::NotFound);
        }

        id.parse().map(Self).map_err(|_| ApiError::NotFound)
    }
}
