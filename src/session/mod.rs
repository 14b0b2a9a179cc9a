//! Per-player storage of the dealt board and its claim flags.
//!
//! The two values are stored under independent keys; either can be missing
//! or stale and the game manager copes with both.

mod memory;
mod postgres;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use sqlx::PgPool;

use crate::models::{Board, ClaimVector};

pub use memory::MemorySessionStore;
pub use postgres::PgSession;

/// Storage for a single player's game
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get_board(&self) -> Result<Option<Board>>;
    async fn set_board(&self, board: &Board) -> Result<()>;
    async fn get_claims(&self) -> Result<Option<ClaimVector>>;
    async fn set_claims(&self, claims: &ClaimVector) -> Result<()>;
}

/// Which session storage the server runs with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStoreKind {
    Memory,
    Postgres,
}

impl std::str::FromStr for SessionStoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "postgres" => Ok(Self::Postgres),
            other => anyhow::bail!("Unknown session store '{}'", other),
        }
    }
}

pub enum SessionBackend {
    Memory(MemorySessionStore),
    Postgres(PgPool),
}

impl SessionBackend {
    pub fn new(kind: SessionStoreKind, pool: PgPool) -> Self {
        match kind {
            SessionStoreKind::Memory => Self::Memory(MemorySessionStore::new()),
            SessionStoreKind::Postgres => Self::Postgres(pool),
        }
    }

    /// Session handle scoped to one player
    pub fn for_player(&self, player_id: i64) -> Box<dyn SessionStore + '_> {
        match self {
            Self::Memory(store) => Box::new(store.session(player_id)),
            Self::Postgres(pool) => Box::new(PgSession::new(pool.clone(), player_id)),
        }
    }
}
