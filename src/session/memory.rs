use std::time::{Duration, Instant};

use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;

use super::SessionStore;
use crate::models::{Board, ClaimVector};

/// Stored game for one player
#[derive(Debug, Clone)]
struct StoredGame {
    board: Option<Board>,
    claims: Option<ClaimVector>,
    touched_at: Instant,
}

impl Default for StoredGame {
    fn default() -> Self {
        Self {
            board: None,
            claims: None,
            touched_at: Instant::now(),
        }
    }
}

/// In-process session storage keyed by player id
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    games: DashMap<i64, StoredGame>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self, player_id: i64) -> MemorySession<'_> {
        MemorySession {
            store: self,
            player_id,
        }
    }

    /// Drop games nobody has touched for longer than `idle_ttl`.
    /// Returns how many were removed.
    pub fn evict_idle(&self, idle_ttl: Duration) -> usize {
        let now = Instant::now();
        let mut removed = 0;
        self.games.retain(|_, game| {
            let keep = now.duration_since(game.touched_at) <= idle_ttl;
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

/// Handle onto one player's entry in a [`MemorySessionStore`]
pub struct MemorySession<'a> {
    store: &'a MemorySessionStore,
    player_id: i64,
}

impl MemorySession<'_> {
    fn read<T>(&self, f: impl FnOnce(&StoredGame) -> T) -> Option<T> {
        self.store.games.get_mut(&self.player_id).map(|mut game| {
            game.touched_at = Instant::now();
            f(&game)
        })
    }

    fn write(&self, f: impl FnOnce(&mut StoredGame)) {
        let mut game = self.store.games.entry(self.player_id).or_default();
        game.touched_at = Instant::now();
        f(&mut game);
    }
}

#[async_trait]
impl<'a> SessionStore for MemorySession<'a> {
    async fn get_board(&self) -> Result<Option<Board>> {
        Ok(self.read(|game| game.board.clone()).flatten())
    }

    async fn set_board(&self, board: &Board) -> Result<()> {
        self.write(|game| game.board = Some(board.clone()));
        Ok(())
    }

    async fn get_claims(&self) -> Result<Option<ClaimVector>> {
        Ok(self.read(|game| game.claims.clone()).flatten())
    }

    async fn set_claims(&self, claims: &ClaimVector) -> Result<()> {
        self.write(|game| game.claims = Some(claims.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_players_are_isolated() {
        let store = MemorySessionStore::new();
        store
            .session(1)
            .set_board(&Board::new(vec![1, 2, 3]))
            .await
            .unwrap();

        assert_eq!(
            store.session(1).get_board().await.unwrap(),
            Some(Board::new(vec![1, 2, 3]))
        );
        assert_eq!(store.session(2).get_board().await.unwrap(), None);
        assert_eq!(store.session(1).get_claims().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_evict_idle() {
        let store = MemorySessionStore::new();
        store
            .session(7)
            .set_claims(&ClaimVector::unclaimed(4))
            .await
            .unwrap();

        assert_eq!(store.evict_idle(Duration::from_secs(3600)), 0);
        assert_eq!(store.len(), 1);

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(store.evict_idle(Duration::from_millis(1)), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_evict_idle_while_players_join() {
        let store = MemorySessionStore::new();

        std::thread::scope(|scope| {
            scope.spawn(|| {
                for player_id in 0..20_000 {
                    store
                        .session(player_id)
                        .write(|game| game.claims = Some(ClaimVector::unclaimed(1)));
                }
            });

            // Nothing is idle yet, concurrent inserts must not skew the count
            for _ in 0..2_000 {
                assert_eq!(store.evict_idle(Duration::from_secs(3600)), 0);
            }
        });

        assert_eq!(store.len(), 20_000);
    }
}
