/// Database layer
///
/// - `pool`: PostgreSQL connection pool
/// - `migrations`: embedded schema migrations
///
/// # Example
///
/// ```no_run
/// use todoboard_shared::db::pool::create_pool;
/// use todoboard_shared::db::migrations::run_migrations;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let url = std::env::var("DATABASE_URL")?;
///     let pool = create_pool(&url, 10).await?;
///     run_migrations(&pool).await?;
///     Ok(())
/// }
/// ```

pub mod migrations;
pub mod pool;
