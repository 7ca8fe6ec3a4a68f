//! Database connection pool.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Open a connection pool to `database_url`.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(max_connections, "connecting to database");
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}
