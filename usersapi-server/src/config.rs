//! Configurazione del server, letta dalle variabili d'ambiente.

use anyhow::Context;
use std::net::SocketAddr;

use crate::sqlite_url_from;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// URL SQLite già normalizzato (file creato se mancante)
    pub database_url: String,
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Legge DATABASE_URL e BIND_ADDR; i valori mancanti usano i default.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_values(
            std::env::var("DATABASE_URL").ok().as_deref(),
            std::env::var("BIND_ADDR").ok().as_deref(),
        )
    }

    pub fn from_values(
        database_url: Option<&str>,
        bind_addr: Option<&str>,
    ) -> anyhow::Result<Self> {
        let database_url = sqlite_url_from(database_url.unwrap_or(crate::DEFAULT_DB_PATH))
            .context("build sqlite DATABASE_URL")?;
        let bind = bind_addr.unwrap_or(DEFAULT_BIND_ADDR);
        // converte la stringa in un SocketAddr (host + porta)
        let bind_addr: SocketAddr = bind
            .parse()
            .with_context(|| format!("parse BIND_ADDR {:?}", bind))?;
        Ok(Self { database_url, bind_addr })
    }
}
