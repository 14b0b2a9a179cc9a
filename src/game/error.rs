use thiserror::Error;

/// Failures of the collaborators the game manager depends on.
/// Ordinary game input (stale claims, missing state) never ends up here.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("square catalog returned {returned} squares, {requested} needed for a board")]
    NotEnoughSquares { requested: usize, returned: usize },
    #[error("square catalog unavailable: {0}")]
    Catalog(#[source] anyhow::Error),
    #[error("session store unavailable: {0}")]
    Session(#[source] anyhow::Error),
}
