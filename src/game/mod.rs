// Game engine modules

pub mod error;
pub mod layout;
pub mod manager;
pub mod win;

pub use error::GameError;
pub use layout::BoardLayout;
pub use manager::{ActiveGame, GameManager};
pub use win::WinEvaluator;

/// Squares along each side of the board
pub const SQUARES_PER_LINE: usize = 5;
/// Squares dealt onto every board
pub const SQUARE_COUNT: usize = SQUARES_PER_LINE * SQUARES_PER_LINE;
