//! Storage trait and implementations
//!
//! Handlers only depend on [`FeedbackStore`], with:
//! - PostgreSQL implementation in [`super::repos::FeedbackRepo`]
//! - In-memory implementation for testing

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use super::repos::Feedback;
use crate::models::NewFeedback;

/// Storage error, surfaced to clients as a 500 with the driver text
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Trait for feedback persistence (testable)
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Insert a record stamped with the current time and return it with its id.
    async fn create_feedback(&self, feedback: &NewFeedback) -> Result<Feedback, StoreError>;

    /// All records, newest first.
    async fn list_feedback(&self) -> Result<Vec<Feedback>, StoreError>;

    /// Release the underlying connection. Called once at shutdown.
    async fn close(&self) {}
}

/// In-memory store for testing
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Feedback>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl FeedbackStore for MemoryStore {
    async fn create_feedback(&self, feedback: &NewFeedback) -> Result<Feedback, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        let record = Feedback {
            id: rows.len() as i32 + 1,
            name: feedback.name().to_owned(),
            subject: feedback.subject().to_owned(),
            message: feedback.message().to_owned(),
            created_at: Utc::now(),
        };
        rows.push(record.clone());
        Ok(record)
    }

    async fn list_feedback(&self) -> Result<Vec<Feedback>, StoreError> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(name: &str) -> NewFeedback {
        NewFeedback::new(name, "Subject", "A message long enough").unwrap()
    }

    #[tokio::test]
    async fn memory_store_assigns_increasing_ids() {
        let store = MemoryStore::new();
        let a = store.create_feedback(&sample("a")).await.unwrap();
        let b = store.create_feedback(&sample("b")).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn memory_store_lists_newest_first() {
        let store = MemoryStore::new();
        assert!(store.list_feedback().await.unwrap().is_empty());

        store.create_feedback(&sample("first")).await.unwrap();
        store.create_feedback(&sample("second")).await.unwrap();

        let names: Vec<_> = store
            .list_feedback()
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, ["second", "first"]);
    }
}
