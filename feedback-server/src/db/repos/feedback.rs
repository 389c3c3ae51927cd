//! Feedback repository
//!
//! - create: single INSERT ... RETURNING inside a transaction
//! - list: full table, newest first, no limit

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgConnectOptions;
use sqlx::{FromRow, PgPool};

use crate::db::migrations;
use crate::db::pool::create_pool;
use crate::db::store::{FeedbackStore, StoreError};
use crate::models::NewFeedback;

/// Feedback record from database
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Feedback {
    pub id: i32,
    pub name: String,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Feedback repository, owning the connection for the life of the server
pub struct FeedbackRepo {
    pool: PgPool,
}

impl FeedbackRepo {
    /// Connect and ensure the feedback table exists.
    ///
    /// Connection failures propagate; nothing is retried.
    pub async fn initialize(options: PgConnectOptions) -> Result<Self, StoreError> {
        let pool = create_pool(options).await?;
        migrations::run(&pool).await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl FeedbackStore for FeedbackRepo {
    async fn create_feedback(&self, feedback: &NewFeedback) -> Result<Feedback, StoreError> {
        // Dropping the transaction on error rolls the insert back
        let mut tx = self.pool.begin().await?;

        let record: Feedback = sqlx::query_as(
            r#"
            INSERT INTO feedback (name, subject, message, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, subject, message, created_at
            "#,
        )
        .bind(feedback.name())
        .bind(feedback.subject())
        .bind(feedback.message())
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(record)
    }

    async fn list_feedback(&self) -> Result<Vec<Feedback>, StoreError> {
        let rows: Vec<Feedback> = sqlx::query_as(
            r#"
            SELECT id, name, subject, message, created_at
            FROM feedback
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database connection closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Integration tests - run with DATABASE_URL set
    // cargo test -p feedback-server -- --ignored

    async fn repo() -> FeedbackRepo {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let options: PgConnectOptions = url.parse().expect("invalid DATABASE_URL");
        FeedbackRepo::initialize(options)
            .await
            .expect("initialize failed")
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_returns_persisted_record() {
        let repo = repo().await;
        let input = NewFeedback::new("Ada", "Repo test", "Persisted via the repo").unwrap();

        let before = Utc::now();
        let created = repo.create_feedback(&input).await.unwrap();

        assert!(created.id > 0);
        assert_eq!(created.name, "Ada");
        assert_eq!(created.subject, "Repo test");
        assert_eq!(created.message, "Persisted via the repo");
        // Postgres keeps microseconds, so allow for truncation
        assert!(created.created_at >= before - chrono::Duration::milliseconds(1));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn list_is_newest_first() {
        let repo = repo().await;
        let a = repo
            .create_feedback(&NewFeedback::new("A", "Order", "First of two records").unwrap())
            .await
            .unwrap();
        let b = repo
            .create_feedback(&NewFeedback::new("B", "Order", "Second of two records").unwrap())
            .await
            .unwrap();

        let ids: Vec<i32> = repo
            .list_feedback()
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.id)
            .collect();

        let pos_a = ids.iter().position(|id| *id == a.id).unwrap();
        let pos_b = ids.iter().position(|id| *id == b.id).unwrap();
        assert!(pos_b < pos_a);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn initialize_is_idempotent() {
        let first = repo().await;
        let second = repo().await;
        assert_eq!(
            first.list_feedback().await.unwrap().len(),
            second.list_feedback().await.unwrap().len()
        );
    }
}
