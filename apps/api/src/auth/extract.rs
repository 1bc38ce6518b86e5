//! Axum extractors for authenticated requests.
//!
//! `AuthUser` rejects with 401 when the bearer token is missing, invalid,
//! or expired, or when the user row no longer exists. `OptionalAuthUser`
//! yields `None` in those cases instead, for endpoints that work both
//! anonymously and signed-in.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::auth::jwt;
use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;

pub struct AuthUser(pub User);

pub struct OptionalAuthUser(pub Option<User>);

async fn user_from_parts(parts: &Parts, state: &AppState) -> Result<User, AppError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Access token is required".to_string()))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Access token is required".to_string()))?;

    let claims = jwt::verify(token, &state.config.jwt_secret)
        .map_err(|e| AppError::Unauthorized(e.to_string()))?;

    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(claims.sub)
        .fetch_optional(&state.db)
        .await?;

    user.ok_or_else(|| AppError::Unauthorized("User not found".to_string()))
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        user_from_parts(parts, state).await.map(AuthUser)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Anonymous callers are fine; database failures still surface.
        match user_from_parts(parts, state).await {
            Ok(user) => Ok(OptionalAuthUser(Some(user))),
            Err(AppError::Unauthorized(_)) => Ok(OptionalAuthUser(None)),
            Err(e) => Err(e),
        }
    }
}
