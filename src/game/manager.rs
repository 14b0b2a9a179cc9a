use super::{BoardLayout, GameError, WinEvaluator};
use crate::{
    catalog::SquareCatalog,
    models::{Board, ClaimVector, GameState, Square, SquareId, SquareView},
    session::SessionStore,
};

/// A player's game as loaded from the session store
#[derive(Debug, Clone)]
pub struct ActiveGame {
    pub board: Board,
    pub claims: ClaimVector,
    pub squares: Vec<Square>,
}

/// Deals boards, records claims and builds the per-player view.
///
/// There is no finished state: a player keeps claiming squares after lines
/// are completed, the win tally is informational only.
#[derive(Debug, Clone, Copy)]
pub struct GameManager {
    layout: BoardLayout,
}

impl GameManager {
    pub fn new(layout: BoardLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    /// Deal a fresh board and store it with an all-unclaimed vector,
    /// replacing whatever game the player had before.
    pub async fn start_new_game(
        &self,
        catalog: &dyn SquareCatalog,
        session: &dyn SessionStore,
    ) -> Result<ActiveGame, GameError> {
        let requested = self.layout.square_count();
        let squares = catalog
            .get_random(requested)
            .await
            .map_err(GameError::Catalog)?;

        if squares.len() != requested {
            return Err(GameError::NotEnoughSquares {
                requested,
                returned: squares.len(),
            });
        }

        let board = Board::new(squares.iter().map(|square| square.id).collect());
        let claims = ClaimVector::unclaimed(requested);

        // A new board must never sit next to the previous game's flags
        session.set_claims(&claims).await.map_err(GameError::Session)?;
        session.set_board(&board).await.map_err(GameError::Session)?;

        tracing::info!("Dealt new board of {} squares", board.len());

        Ok(ActiveGame {
            board,
            claims,
            squares,
        })
    }

    /// Resolve a stored board back into squares, keeping board order
    pub async fn resume_game(
        &self,
        board: &Board,
        catalog: &dyn SquareCatalog,
    ) -> Result<Vec<Square>, GameError> {
        let squares = catalog
            .get_by_ids(board.ids())
            .await
            .map_err(GameError::Catalog)?;

        if squares.len() < board.len() {
            tracing::warn!(
                "Resolved only {} of {} board squares from catalog",
                squares.len(),
                board.len()
            );
        }

        Ok(squares)
    }

    /// Load the player's stored game, dealing a new one when there is no
    /// board or the stored board is empty.
    pub async fn resume_or_start(
        &self,
        catalog: &dyn SquareCatalog,
        session: &dyn SessionStore,
    ) -> Result<ActiveGame, GameError> {
        let board = match session.get_board().await.map_err(GameError::Session)? {
            Some(board) if !board.is_empty() => board,
            _ => {
                tracing::debug!("No stored board, starting a new game");
                return self.start_new_game(catalog, session).await;
            }
        };

        let squares = self.resume_game(&board, catalog).await?;
        let claims = session
            .get_claims()
            .await
            .map_err(GameError::Session)?
            .unwrap_or_default();

        if claims.len() < board.len() {
            tracing::debug!(
                "Stored claims cover {} of {} positions, treating the rest as unclaimed",
                claims.len(),
                board.len()
            );
        }

        Ok(ActiveGame {
            board,
            claims,
            squares,
        })
    }

    /// Claim `square_id` on `board`.
    ///
    /// Returns the updated vector, or `None` when the square is not on the
    /// board (a stale or forged claim), in which case nothing changes. A
    /// missing vector starts out all unclaimed.
    pub fn apply_claim(
        &self,
        board: &Board,
        claims: Option<ClaimVector>,
        square_id: SquareId,
    ) -> Option<ClaimVector> {
        let position = board.position(square_id)?;
        let mut claims = claims.unwrap_or_else(|| ClaimVector::unclaimed(board.len()));
        claims.claim(position, board.len());
        Some(claims)
    }

    /// Claim a square on the player's stored board and persist the result.
    /// Returns whether the square was on the board.
    pub async fn claim_square(
        &self,
        session: &dyn SessionStore,
        square_id: SquareId,
    ) -> Result<bool, GameError> {
        let Some(board) = session.get_board().await.map_err(GameError::Session)? else {
            tracing::debug!("Ignoring claim for square {}: no board dealt", square_id);
            return Ok(false);
        };

        let claims = session.get_claims().await.map_err(GameError::Session)?;
        match self.apply_claim(&board, claims, square_id) {
            Some(claims) => {
                session.set_claims(&claims).await.map_err(GameError::Session)?;
                Ok(true)
            }
            None => {
                tracing::debug!("Ignoring claim for square {}: not on board", square_id);
                Ok(false)
            }
        }
    }

    /// Pair each resolved square with the claim flag at its board position
    /// and count completed lines.
    pub fn compute_view(
        &self,
        board: &Board,
        claims: &ClaimVector,
        squares: Vec<Square>,
    ) -> GameState {
        let squares = squares
            .into_iter()
            .map(|square| {
                let claimed = board
                    .position(square.id)
                    .is_some_and(|position| claims.is_claimed(position));
                SquareView::new(square, claimed)
            })
            .collect();

        GameState {
            squares,
            winning_lines: WinEvaluator::check(claims, &self.layout),
        }
    }

    /// [`compute_view`](Self::compute_view) for a loaded game
    pub fn view(&self, game: ActiveGame) -> GameState {
        self.compute_view(&game.board, &game.claims, game.squares)
    }
}
