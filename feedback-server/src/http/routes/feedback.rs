//! Feedback endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::db::Feedback;
use crate::http::error::ApiError;
use crate::http::extractors::{FeedbackId, ValidFeedback};
use crate::http::server::AppState;

/// Feedback response
#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub id: i32,
    pub name: String,
    pub subject: String,
    pub message: String,
    pub created_at: String,
}

impl From<Feedback> for FeedbackResponse {
    fn from(f: Feedback) -> Self {
        Self {
            id: f.id,
            name: f.name,
            subject: f.subject,
            message: f.message,
            created_at: f.created_at.to_rfc3339(),
        }
    }
}

/// Placeholder body for `GET /feedback/{id}`
#[derive(Debug, Serialize)]
pub struct FeedbackStubResponse {
    pub message: &'static str,
    pub feedback_id: u64,
}

/// GET /feedback - all feedback, newest first
async fn list_feedback(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<FeedbackResponse>>, ApiError> {
    tracing::info!("Fetching all feedback from database");
    let items = state
        .store
        .list_feedback()
        .await
        .map_err(ApiError::list_failed)?;

    tracing::info!(count = items.len(), "Retrieved feedback");
    Ok(Json(items.into_iter().map(FeedbackResponse::from).collect()))
}

/// POST /feedback - validate and store a submission
async fn create_feedback(
    State(state): State<Arc<AppState>>,
    ValidFeedback(input): ValidFeedback,
) -> Result<(StatusCode, Json<FeedbackResponse>), ApiError> {
    tracing::info!(name = %input.name(), "Creating feedback");
    let created = state
        .store
        .create_feedback(&input)
        .await
        .map_err(ApiError::create_failed)?;

    tracing::info!(id = created.id, "Created feedback");
    Ok((StatusCode::CREATED, Json(FeedbackResponse::from(created))))
}

/// GET /feedback/{id} - does not look anything up yet
async fn get_feedback(FeedbackId(id): FeedbackId) -> Json<FeedbackStubResponse> {
    tracing::info!(id, "Fetching feedback by id");
    Json(FeedbackStubResponse {
        message: "Get specific feedback endpoint",
        feedback_id: id,
    })
}

/// Feedback routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/feedback", get(list_feedback).post(create_feedback))
        .route("/feedback/{id}", get(get_feedback))
}
