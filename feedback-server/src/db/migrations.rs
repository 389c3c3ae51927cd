//! Schema bootstrap for the feedback table

use sqlx::PgPool;

use super::StoreError;

/// Create the feedback table if it does not exist.
///
/// Safe to run on every startup.
pub async fn run(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS feedback (
            id SERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            subject VARCHAR(255) NOT NULL,
            message TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Feedback table ready");
    Ok(())
}
