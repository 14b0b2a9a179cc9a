//! Square catalog access.
//!
//! The catalog owns every square that can be dealt. Game code only sees the
//! [`SquareCatalog`] trait so it can run against Postgres or an in-memory list.

mod memory;
mod postgres;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Square, SquareId};

pub use memory::MemoryCatalog;
pub use postgres::PgCatalog;

#[async_trait]
pub trait SquareCatalog: Send + Sync {
    /// Up to `n` distinct squares in random order
    async fn get_random(&self, n: usize) -> Result<Vec<Square>>;

    /// Squares for `ids` in the same order. Ids the catalog does not know are
    /// skipped, so the result can be shorter than the input.
    async fn get_by_ids(&self, ids: &[SquareId]) -> Result<Vec<Square>>;

    /// Number of squares available for dealing
    async fn count(&self) -> Result<usize>;
}
