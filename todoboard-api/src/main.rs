//! # Todoboard API Server
//!
//! Serves the shared task list over HTTP.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/todoboard cargo run -p todoboard-api
//! DATABASE_URL=memory:// cargo run -p todoboard-api
//! ```

use std::sync::Arc;

use todoboard_api::{
    app::{build_router, AppState},
    config::Config,
};
use todoboard_shared::{
    db::{
        migrations::run_migrations,
        pool::{close_pool, create_pool},
    },
    store::{MemoryStore, PgStore},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "todoboard_api=debug,todoboard_shared=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Todoboard API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;
    let address = config.bind_address();

    let (state, pool) = if config.database.is_memory() {
        tracing::warn!("Using in-memory store; data is lost on shutdown");
        (AppState::new(Arc::new(MemoryStore::new()), config)?, None)
    } else {
        let pool = create_pool(&config.database.url, config.database.max_connections).await?;
        run_migrations(&pool).await?;

        let store = Arc::new(PgStore::new(pool.clone()));
        (AppState::new(store, config)?, Some(pool))
    };

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("Server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for shutdown signal");
            }
            tracing::info!("Shutdown signal received, exiting...");
        })
        .await?;

    if let Some(pool) = pool {
        close_pool(pool).await;
    }

    Ok(())
}
