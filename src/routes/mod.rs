pub mod game;
pub mod health;
pub mod players;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/players", post(players::register))
        .route("/players/me", get(players::get_current_player))
        .route("/game", get(game::play))
        .route("/game/new", post(game::new_game))
        .route("/game/claim/{square_id}", post(game::claim))
}
