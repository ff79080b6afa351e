use anyhow::Context;
use axum::http::StatusCode;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};

pub mod config;
pub mod controllers;
pub mod error;
pub mod routes;
pub mod store;

pub use config::ServerConfig;
pub use controllers::{handle, ApiResponse};
pub use error::ApiError;
pub use store::{Param, Row, SqliteStore, Store, StoreError};

pub const MEMORY_DB_URL: &str = "sqlite::memory:";
pub const DEFAULT_DB_PATH: &str = "users.db";

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}

// Dato un percorso di file, restituisce un URL SQLite valido.
// Crea le directory genitrici e il file se non esistono.
pub fn sqlite_url_for_path(p: &Path) -> anyhow::Result<String> {
    let abs = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };
    if let Some(parent) = abs.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent dirs for {:?}", parent))?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&abs)
        .with_context(|| format!("create/open sqlite file {:?}", abs))?;
    let s = abs.to_string_lossy().replace('\\', "/");
    Ok(format!("sqlite:{}", s))
}

/// Normalizza il valore di DATABASE_URL: accetta un URL "sqlite://..." oppure un percorso.
/// "sqlite::memory:" viene lasciato invariato.
pub fn sqlite_url_from(raw: &str) -> anyhow::Result<String> {
    if raw == MEMORY_DB_URL {
        return Ok(raw.to_string());
    }
    // Rimuovi il prefisso "sqlite:" se presente, per ottenere il percorso del file.
    let path_part = raw
        .strip_prefix("sqlite://")
        .or_else(|| raw.strip_prefix("sqlite:"))
        .unwrap_or(raw);
    sqlite_url_for_path(&PathBuf::from(path_part))
}

// Connect to the database and return a connection pool.
pub async fn connect_pool(db_url: &str) -> anyhow::Result<SqlitePool> {
    let options = if db_url == MEMORY_DB_URL {
        // ogni connessione in memoria è un database diverso: ne teniamo una sola, sempre viva
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new()
    };
    let pool = options
        .connect(db_url)
        .await
        .with_context(|| format!("connect to sqlite via {}", db_url))?;
    Ok(pool)
}

// Crea la tabella users se non esiste.
// AUTOINCREMENT garantisce che un id cancellato non venga riusato.
pub async fn run_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            name      TEXT NOT NULL,
            firstname TEXT NOT NULL,
            email     TEXT NOT NULL
        );"#,
    )
    .execute(pool)
    .await
    .context("apply migration: create table users")?;
    Ok(())
}

/// Controlla lo stato di salute del database tentando di acquisire una connessione dal pool.
pub async fn health_with_pool(pool: &SqlitePool) -> StatusCode {
    match pool.acquire().await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
