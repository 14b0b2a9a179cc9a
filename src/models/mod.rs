pub mod game;
pub mod player;
pub mod square;

pub use game::{Board, ClaimVector, GameState, SquareView, WinTally};
pub use player::Player;
pub use square::{Square, SquareId, SquareType};
