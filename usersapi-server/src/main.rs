use anyhow::Context;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use usersapi_server::{connect_pool, routes, run_migrations, AppState, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG controlla il livello dei log, di default "info"
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env().context("load configuration")?;
    info!(database_url = %config.database_url, "using database");
    // Connetti al database
    let pool = connect_pool(&config.database_url).await.context("connect to sqlite")?;
    // Crea la tabella users se manca
    run_migrations(&pool).await.context("run migrations")?;

    let state = Arc::new(AppState { pool });
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .context("bind tcp listener")?;
    info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app.into_make_service())
        .await
        .context("server shutdown")?;

    Ok(())
}
