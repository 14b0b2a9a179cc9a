use crate::{auth, auth::AuthenticatedPlayer, db, models::Player, AppState};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Longest accepted player name, in characters
const MAX_NAME_LENGTH: usize = 50;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// JWT for the game endpoints
    pub access_token: String,
    pub player_id: i64,
    pub name: String,
}

/// Register a new player and hand back a token for the game endpoints
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, StatusCode> {
    let name = validate_name(&payload.name).ok_or_else(|| {
        tracing::debug!("Rejected player name {:?}", payload.name);
        StatusCode::BAD_REQUEST
    })?;

    let player = db::queries::create_player(&state.db, name)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create player: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    let access_token = auth::generate_token(
        player.player_id,
        &player.name,
        &state.config.security.jwt_secret,
    )
    .map_err(|e| {
        tracing::error!("Failed to generate JWT token: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    tracing::info!("Registered player: {} (ID: {})", player.name, player.player_id);

    Ok(Json(RegisterResponse {
        access_token,
        player_id: player.player_id,
        name: player.name,
    }))
}

/// Get the player behind the current token
pub async fn get_current_player(
    player: AuthenticatedPlayer,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Player>, StatusCode> {
    load_player(&state, &player).await.map(Json)
}

/// Look up the registered player for a token.
/// A token whose player row is gone must register again.
pub async fn load_player(
    state: &AppState,
    player: &AuthenticatedPlayer,
) -> Result<Player, StatusCode> {
    db::queries::get_player(&state.db, player.player_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load player {}: {}", player.player_id, e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or_else(|| {
            tracing::debug!("Player {} is no longer registered", player.player_id);
            StatusCode::UNAUTHORIZED
        })
}

fn validate_name(name: &str) -> Option<&str> {
    let name = name.trim();
    let length = name.chars().count();
    (1..=MAX_NAME_LENGTH).contains(&length).then_some(name)
}
