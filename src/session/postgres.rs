use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use super::SessionStore;
use crate::{
    db,
    models::{Board, ClaimVector},
};

/// Session stored in the `player_games` table
pub struct PgSession {
    pool: PgPool,
    player_id: i64,
}

impl PgSession {
    pub fn new(pool: PgPool, player_id: i64) -> Self {
        Self { pool, player_id }
    }
}

#[async_trait]
impl SessionStore for PgSession {
    async fn get_board(&self) -> Result<Option<Board>> {
        let squares = db::queries::get_player_board(&self.pool, self.player_id).await?;
        Ok(squares.map(Board::from))
    }

    async fn set_board(&self, board: &Board) -> Result<()> {
        db::queries::set_player_board(&self.pool, self.player_id, board.ids()).await?;
        Ok(())
    }

    async fn get_claims(&self) -> Result<Option<ClaimVector>> {
        let claims = db::queries::get_player_claims(&self.pool, self.player_id).await?;
        Ok(claims.map(ClaimVector::from))
    }

    async fn set_claims(&self, claims: &ClaimVector) -> Result<()> {
        db::queries::set_player_claims(&self.pool, self.player_id, claims.as_slice()).await?;
        Ok(())
    }
}
