use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered bingo player
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Player {
    pub player_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
