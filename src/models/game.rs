use serde::{Deserialize, Serialize};

use super::{Square, SquareId, SquareType};

/// Square ids in grid reading order (row-major).
/// Dealt once per game; claims never change which squares are on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board(Vec<SquareId>);

impl Board {
    pub fn new(ids: Vec<SquareId>) -> Self {
        Self(ids)
    }

    /// Board position of a square, if it was dealt onto this board
    pub fn position(&self, square_id: SquareId) -> Option<usize> {
        self.0.iter().position(|&id| id == square_id)
    }

    pub fn ids(&self) -> &[SquareId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<SquareId>> for Board {
    fn from(ids: Vec<SquareId>) -> Self {
        Self(ids)
    }
}

/// Per-position claim flags, index-aligned with a [`Board`].
///
/// A stored vector may be shorter than the board it belongs to (for example a
/// vector left over from an older grid). Positions past its end read as
/// unclaimed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimVector(Vec<bool>);

impl ClaimVector {
    /// All-false vector of the given length
    pub fn unclaimed(len: usize) -> Self {
        Self(vec![false; len])
    }

    pub fn is_claimed(&self, position: usize) -> bool {
        self.0.get(position).copied().unwrap_or(false)
    }

    /// Marks `position` as claimed, growing the vector with unclaimed
    /// flags up to `len` first when it is too short.
    pub fn claim(&mut self, position: usize, len: usize) {
        let required = len.max(position + 1);
        if self.0.len() < required {
            self.0.resize(required, false);
        }
        self.0[position] = true;
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn claimed_count(&self) -> usize {
        self.0.iter().filter(|&&claimed| claimed).count()
    }
}

impl From<Vec<bool>> for ClaimVector {
    fn from(flags: Vec<bool>) -> Self {
        Self(flags)
    }
}

/// Completed lines by direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinTally {
    pub horizontal: usize,
    pub vertical: usize,
    pub diagonal: usize,
}

impl WinTally {
    pub fn new(horizontal: usize, vertical: usize, diagonal: usize) -> Self {
        Self {
            horizontal,
            vertical,
            diagonal,
        }
    }

    /// Total number of completed lines in any direction
    pub fn total(&self) -> usize {
        self.horizontal + self.vertical + self.diagonal
    }
}

/// A dealt square together with its claim flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquareView {
    pub id: SquareId,
    pub text: String,
    #[serde(rename = "type")]
    pub square_type: SquareType,
    pub description: String,
    pub claimed: bool,
}

impl SquareView {
    pub fn new(square: Square, claimed: bool) -> Self {
        Self {
            id: square.id,
            text: square.text,
            square_type: square.square_type,
            description: square.description,
            claimed,
        }
    }
}

/// Read-only view of one player's game, rebuilt on every request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub squares: Vec<SquareView>,
    pub winning_lines: WinTally,
}

impl GameState {
    #[cfg(test)]
    pub fn claimed_ids(&self) -> Vec<SquareId> {
        self.squares
            .iter()
            .filter(|square| square.claimed)
            .map(|square| square.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_position() {
        let board = Board::new(vec![7, 3, 9]);
        assert_eq!(board.position(3), Some(1));
        assert_eq!(board.position(42), None);
    }

    #[test]
    fn test_short_claim_vector_reads_unclaimed() {
        let claims = ClaimVector::from(vec![true, true]);
        assert!(claims.is_claimed(1));
        assert!(!claims.is_claimed(2));
        assert!(!claims.is_claimed(100));
    }

    #[test]
    fn test_claim_extends_short_vector() {
        let mut claims = ClaimVector::from(vec![true]);
        claims.claim(3, 9);

        assert_eq!(claims.len(), 9);
        assert!(claims.is_claimed(0));
        assert!(claims.is_claimed(3));
        assert_eq!(claims.claimed_count(), 2);
    }

    #[test]
    fn test_claim_keeps_longer_vector() {
        let mut claims = ClaimVector::unclaimed(12);
        claims.claim(2, 9);
        assert_eq!(claims.len(), 12);
    }

    #[test]
    fn test_tally_total() {
        let tally = WinTally::new(1, 2, 1);
        assert_eq!(tally.total(), 4);
        assert_eq!(WinTally::default().total(), 0);
    }
}
