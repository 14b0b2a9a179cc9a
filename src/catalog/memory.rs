use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use rand::seq::SliceRandom;
use tokio::fs;

use super::SquareCatalog;
use crate::models::{Square, SquareId};

/// Catalog held entirely in memory
pub struct MemoryCatalog {
    squares: Vec<Square>,
    by_id: HashMap<SquareId, usize>,
}

impl MemoryCatalog {
    pub fn new(squares: Vec<Square>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(squares.len());
        for (index, square) in squares.iter().enumerate() {
            if by_id.insert(square.id, index).is_some() {
                bail!("Duplicate square id {} in catalog", square.id);
            }
        }
        Ok(Self { squares, by_id })
    }

    /// Load a catalog from a JSON array of squares
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read square catalog {}", path.display()))?;
        let squares: Vec<Square> = serde_json::from_str(&content)
            .with_context(|| format!("Invalid square catalog {}", path.display()))?;

        tracing::info!("Loaded {} squares into catalog", squares.len());

        Self::new(squares)
    }
}

#[async_trait]
impl SquareCatalog for MemoryCatalog {
    async fn get_random(&self, n: usize) -> Result<Vec<Square>> {
        let mut squares = self.squares.clone();
        squares.shuffle(&mut rand::rng());
        squares.truncate(n);
        Ok(squares)
    }

    async fn get_by_ids(&self, ids: &[SquareId]) -> Result<Vec<Square>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.by_id.get(id))
            .map(|&index| self.squares[index].clone())
            .collect())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.squares.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SquareType;
    use std::collections::HashSet;

    fn catalog(n: i32) -> MemoryCatalog {
        let squares = (0..n)
            .map(|id| Square::new(id, format!("Square {}", id), SquareType::Quote, ""))
            .collect();
        MemoryCatalog::new(squares).unwrap()
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let squares = vec![
            Square::new(1, "a", SquareType::Event, ""),
            Square::new(1, "b", SquareType::Event, ""),
        ];
        assert!(MemoryCatalog::new(squares).is_err());
    }

    #[test]
    fn test_random_squares_are_distinct() {
        let catalog = catalog(40);
        let squares = tokio_test::block_on(catalog.get_random(25)).unwrap();

        assert_eq!(squares.len(), 25);
        let ids: HashSet<_> = squares.iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), 25);
    }

    #[test]
    fn test_random_capped_at_catalog_size() {
        let catalog = catalog(3);
        let squares = tokio_test::block_on(catalog.get_random(25)).unwrap();
        assert_eq!(squares.len(), 3);
    }

    #[tokio::test]
    async fn test_get_by_ids_keeps_order_and_skips_unknown() {
        let catalog = catalog(10);
        let squares = catalog.get_by_ids(&[7, 99, 2, 5]).await.unwrap();
        let ids: Vec<_> = squares.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![7, 2, 5]);
    }

    #[tokio::test]
    async fn test_load_from_json() {
        let path = std::env::temp_dir().join(format!("bingo-squares-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"[{"id": 1, "text": "It works on my machine", "type": "quote", "description": "Classic"}]"#,
        )
        .unwrap();

        let catalog = MemoryCatalog::load(&path).await.unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(catalog.count().await.unwrap(), 1);
        let squares = catalog.get_by_ids(&[1]).await.unwrap();
        assert_eq!(squares[0].square_type, SquareType::Quote);
    }
}
