use anyhow::{Context, Result};
use serde::Deserialize;
use std::{env, time::Duration};

use crate::session::SessionStoreKind;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub security: SecurityConfig,
    pub game: GameConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
}

/// Runtime game settings. Grid size is fixed at build time and lives in
/// [`crate::game::SQUARES_PER_LINE`].
#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    pub session_store: SessionStoreKind,
    pub session_idle_ttl: Duration,
    /// JSON catalog to serve instead of the `squares` table
    pub squares_path: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database = DatabaseConfig {
            url: env::var("DATABASE_URL")
                .context("DATABASE_URL must be set")?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a number")?,
        };

        let server = ServerConfig {
            host: env::var("HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a number")?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
        };

        let security = SecurityConfig {
            jwt_secret: env::var("JWT_SECRET")
                .context("JWT_SECRET must be set")?,
        };

        let game = GameConfig {
            session_store: env::var("SESSION_STORE")
                .unwrap_or_else(|_| "postgres".to_string())
                .parse()
                .context("SESSION_STORE must be 'postgres' or 'memory'")?,
            session_idle_ttl: Duration::from_secs(
                env::var("SESSION_IDLE_TTL_SECS")
                    .unwrap_or_else(|_| "86400".to_string())
                    .parse()
                    .context("SESSION_IDLE_TTL_SECS must be a number")?,
            ),
            squares_path: env::var("SQUARES_PATH")
                .ok()
                .filter(|path| !path.trim().is_empty()),
        };

        Ok(Config {
            database,
            server,
            security,
            game,
        })
    }

    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
