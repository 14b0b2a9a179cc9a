use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, StatusCode},
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::AppState;

/// How long a player token stays valid
const TOKEN_LIFETIME_DAYS: i64 = 30;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    pub sub: String,  // Player ID
    pub name: String, // Player name
    pub exp: usize,   // Expiration time
}

#[derive(Debug, Clone)]
pub struct AuthenticatedPlayer {
    pub player_id: i64,
    pub name: String,
}

/// Extractor for registered players from JWT tokens
impl<S> FromRequestParts<S> for AuthenticatedPlayer
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = StatusCode;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let app_state = Arc::<AppState>::from_ref(state);
        let token = extract_token(parts);

        async move {
            let token = token.ok_or(StatusCode::UNAUTHORIZED)?;
            verify_token(&token, &app_state.config.security.jwt_secret)
                .ok_or(StatusCode::UNAUTHORIZED)
        }
    }
}

/// Bearer header first, then a `token` query parameter
fn extract_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(String::from)
        .or_else(|| {
            parts
                .uri
                .query()
                .and_then(|q| serde_urlencoded::from_str::<Vec<(String, String)>>(q).ok())
                .and_then(|params| {
                    params
                        .into_iter()
                        .find(|(k, _)| k == "token")
                        .map(|(_, v)| v)
                })
        })
}

fn verify_token(token: &str, jwt_secret: &str) -> Option<AuthenticatedPlayer> {
    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_ref()),
        &Validation::default(),
    )
    .ok()?;

    let player_id = token_data.claims.sub.parse::<i64>().ok()?;

    Some(AuthenticatedPlayer {
        player_id,
        name: token_data.claims.name,
    })
}

/// Generate a JWT token for a player
pub fn generate_token(
    player_id: i64,
    name: &str,
    jwt_secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let expiration = (chrono::Utc::now() + chrono::Duration::days(TOKEN_LIFETIME_DAYS)).timestamp();

    let claims = TokenClaims {
        sub: player_id.to_string(),
        name: name.to_string(),
        exp: expiration as usize,
    };

    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(jwt_secret.as_ref()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    const SECRET: &str = "test-secret";

    fn parts(request: Request<()>) -> Parts {
        request.into_parts().0
    }

    #[test]
    fn test_token_round_trip() {
        let token = generate_token(42, "Ada", SECRET).unwrap();
        let player = verify_token(&token, SECRET).unwrap();

        assert_eq!(player.player_id, 42);
        assert_eq!(player.name, "Ada");
    }

    #[test]
    fn test_token_with_wrong_secret_rejected() {
        let token = generate_token(42, "Ada", SECRET).unwrap();
        assert!(verify_token(&token, "other-secret").is_none());
        assert!(verify_token("not-a-token", SECRET).is_none());
    }

    #[test]
    fn test_extract_token_from_header_or_query() {
        let from_header = parts(
            Request::builder()
                .uri("/api/game")
                .header(header::AUTHORIZATION, "Bearer abc")
                .body(())
                .unwrap(),
        );
        assert_eq!(extract_token(&from_header).as_deref(), Some("abc"));

        let from_query = parts(
            Request::builder()
                .uri("/api/game?foo=1&token=xyz")
                .body(())
                .unwrap(),
        );
        assert_eq!(extract_token(&from_query).as_deref(), Some("xyz"));

        let missing = parts(Request::builder().uri("/api/game").body(()).unwrap());
        assert_eq!(extract_token(&missing), None);
    }
}
