//! REST server binary.
//!
//! Binds the configured address and serves the market data API over a
//! lazily initialized store session, so the process comes up (and
//! answers health checks) even while the store is unreachable.

use predmarket_store::api::rest::{AppState, create_router};
use predmarket_store::config::ServerConfig;
use predmarket_store::infrastructure::store::SharedStore;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Absent .env files are fine; real environments set variables directly.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let server = ServerConfig::from_env()?;
    let store = SharedStore::from_env();
    let database_key = store.database_key().map(str::to_owned);

    let state = Arc::new(AppState::new(store, database_key));
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&server.bind_addr).await?;
    tracing::info!(addr = %server.bind_addr, "market data API listening");
    axum::serve(listener, router).await?;

    Ok(())
}
