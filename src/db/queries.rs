use sqlx::{PgPool, Result};

use crate::models::{Player, Square, SquareId};

// Player queries
pub async fn create_player(pool: &PgPool, name: &str) -> Result<Player> {
    sqlx::query_as::<_, Player>(
        r#"
        INSERT INTO players (name)
        VALUES ($1)
        RETURNING *
        "#,
    )
    .bind(name)
    .fetch_one(pool)
    .await
}

pub async fn get_player(pool: &PgPool, player_id: i64) -> Result<Option<Player>> {
    sqlx::query_as::<_, Player>("SELECT * FROM players WHERE player_id = $1")
        .bind(player_id)
        .fetch_optional(pool)
        .await
}

// Square catalog queries
pub async fn get_random_squares(pool: &PgPool, limit: i64) -> Result<Vec<Square>> {
    sqlx::query_as::<_, Square>(
        r#"
        SELECT id, text, square_type, description
        FROM squares
        ORDER BY random()
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Rows come back in table order, not in the order of `ids`
pub async fn get_squares_by_ids(pool: &PgPool, ids: &[SquareId]) -> Result<Vec<Square>> {
    sqlx::query_as::<_, Square>(
        r#"
        SELECT id, text, square_type, description
        FROM squares
        WHERE id = ANY($1)
        "#,
    )
    .bind(ids)
    .fetch_all(pool)
    .await
}

pub async fn count_squares(pool: &PgPool) -> Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM squares")
        .fetch_one(pool)
        .await
}

// Player game queries
// Board and claims are written independently; each upsert leaves the other column alone.
pub async fn get_player_board(pool: &PgPool, player_id: i64) -> Result<Option<Vec<SquareId>>> {
    let squares = sqlx::query_scalar::<_, Option<Vec<SquareId>>>(
        "SELECT squares FROM player_games WHERE player_id = $1",
    )
    .bind(player_id)
    .fetch_optional(pool)
    .await?;

    Ok(squares.flatten())
}

pub async fn set_player_board(pool: &PgPool, player_id: i64, squares: &[SquareId]) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO player_games (player_id, squares)
        VALUES ($1, $2)
        ON CONFLICT (player_id)
        DO UPDATE SET
            squares = $2,
            updated_at = NOW()
        "#,
    )
    .bind(player_id)
    .bind(squares)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn get_player_claims(pool: &PgPool, player_id: i64) -> Result<Option<Vec<bool>>> {
    let claims = sqlx::query_scalar::<_, Option<Vec<bool>>>(
        "SELECT claims FROM player_games WHERE player_id = $1",
    )
    .bind(player_id)
    .fetch_optional(pool)
    .await?;

    Ok(claims.flatten())
}

pub async fn set_player_claims(pool: &PgPool, player_id: i64, claims: &[bool]) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO player_games (player_id, claims)
        VALUES ($1, $2)
        ON CONFLICT (player_id)
        DO UPDATE SET
            claims = $2,
            updated_at = NOW()
        "#,
    )
    .bind(player_id)
    .bind(claims)
    .execute(pool)
    .await?;

    Ok(())
}
