/// PostgreSQL connection pool
///
/// The pool is sized from `DATABASE_MAX_CONNECTIONS`; everything else uses
/// sqlx defaults.

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

/// Connects to `url` and returns a pool of at most `max_connections`
///
/// A zero size is bumped to one so the pool can still serve requests.
///
/// # Errors
///
/// Returns an error if the URL is invalid or the server cannot be reached.
pub async fn create_pool(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    let max_connections = max_connections.max(1);
    info!(max_connections, "Connecting to PostgreSQL");

    // connect() opens the first connection, so an unreachable server fails here
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await?;

    info!("PostgreSQL pool ready");
    Ok(pool)
}

/// Closes the pool, waiting for checked-out connections to come back
pub async fn close_pool(pool: PgPool) {
    pool.close().await;
    info!("PostgreSQL pool closed");
}
