//! Database connection management
//!
//! Uses a sqlx PgPool capped at one connection, so the whole server
//! shares a single connection.

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

/// One connection, reused across requests.
const DEFAULT_MAX_CONNECTIONS: u32 = 1;

/// Connect to PostgreSQL.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
///
/// # Example
///
/// ```ignore
/// let options: PgConnectOptions = "postgres://localhost/fullstack_demo".parse()?;
/// let pool = create_pool(options).await?;
/// ```
pub async fn create_pool(options: PgConnectOptions) -> Result<PgPool, sqlx::Error> {
    let database = options.get_database().unwrap_or("postgres").to_owned();
    let pool = PgPoolOptions::new()
        .max_connections(DEFAULT_MAX_CONNECTIONS)
        .connect_with(options)
        .await?;

    tracing::info!(database = %database, "Connected to database");
    Ok(pool)
}
