use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use super::SquareCatalog;
use crate::{
    db,
    models::{Square, SquareId},
};

/// Catalog backed by the `squares` table
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SquareCatalog for PgCatalog {
    async fn get_random(&self, n: usize) -> Result<Vec<Square>> {
        Ok(db::queries::get_random_squares(&self.pool, n as i64).await?)
    }

    async fn get_by_ids(&self, ids: &[SquareId]) -> Result<Vec<Square>> {
        let found = db::queries::get_squares_by_ids(&self.pool, ids).await?;
        let mut by_id: HashMap<SquareId, Square> =
            found.into_iter().map(|square| (square.id, square)).collect();

        // ANY($1) returns rows in table order, put them back in board order
        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    async fn count(&self) -> Result<usize> {
        Ok(db::queries::count_squares(&self.pool).await? as usize)
    }
}
