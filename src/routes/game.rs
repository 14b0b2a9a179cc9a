use crate::{
    auth::AuthenticatedPlayer,
    game::{ActiveGame, GameError},
    models::{SquareId, SquareView, WinTally},
    routes::players::load_player,
    AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

/// Everything the presentation layer needs to draw a player's board
#[derive(Debug, Serialize)]
pub struct GameResponse {
    pub player_name: String,
    pub column_count: usize,
    pub squares: Vec<SquareView>,
    pub winning_lines: WinTally,
    pub total_lines: usize,
}

/// Current board, dealing one if the player has none
pub async fn play(
    player: AuthenticatedPlayer,
    State(state): State<Arc<AppState>>,
) -> Result<Json<GameResponse>, StatusCode> {
    let player = load_player(&state, &player).await?;
    let session = state.sessions.for_player(player.player_id);

    let game = state
        .manager
        .resume_or_start(state.catalog.as_ref(), session.as_ref())
        .await
        .map_err(internal_error)?;

    Ok(Json(respond(&state, player.name, game)))
}

/// Throw away the current board and deal a new one
pub async fn new_game(
    player: AuthenticatedPlayer,
    State(state): State<Arc<AppState>>,
) -> Result<Json<GameResponse>, StatusCode> {
    let player = load_player(&state, &player).await?;
    let session = state.sessions.for_player(player.player_id);

    let game = state
        .manager
        .start_new_game(state.catalog.as_ref(), session.as_ref())
        .await
        .map_err(internal_error)?;

    tracing::info!("Player {} started a new game", player.player_id);

    Ok(Json(respond(&state, player.name, game)))
}

/// Claim a square and return the updated board.
/// Claims for squares that are not on the board are ignored.
pub async fn claim(
    player: AuthenticatedPlayer,
    Path(square_id): Path<SquareId>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<GameResponse>, StatusCode> {
    let player = load_player(&state, &player).await?;
    let session = state.sessions.for_player(player.player_id);

    let claimed = state
        .manager
        .claim_square(session.as_ref(), square_id)
        .await
        .map_err(internal_error)?;
    if claimed {
        tracing::debug!("Player {} claimed square {}", player.player_id, square_id);
    }

    let game = state
        .manager
        .resume_or_start(state.catalog.as_ref(), session.as_ref())
        .await
        .map_err(internal_error)?;

    Ok(Json(respond(&state, player.name, game)))
}

fn respond(state: &AppState, player_name: String, game: ActiveGame) -> GameResponse {
    let view = state.manager.view(game);
    GameResponse {
        player_name,
        column_count: state.manager.layout().side(),
        total_lines: view.winning_lines.total(),
        squares: view.squares,
        winning_lines: view.winning_lines,
    }
}

fn internal_error(e: GameError) -> StatusCode {
    tracing::error!("Game request failed: {}", e);
    StatusCode::INTERNAL_SERVER_ERROR
}
