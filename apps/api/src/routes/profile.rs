//! Profile: stats, partial updates, password change, account deletion.

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::extract::AuthUser;
use crate::auth::password;
use crate::errors::AppError;
use crate::models::user::PublicUser;
use crate::paths::progress;
use crate::state::AppState;

#[derive(Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RecentProfilePath {
    pub id: Uuid,
    pub goal: String,
    pub generated_by: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
    pub total_paths: i64,
    pub total_steps: i64,
    pub completed_steps: i64,
    pub completion_rate: u32,
    /// Days since registration.
    pub account_age: i64,
    pub recent_paths: Vec<RecentProfilePath>,
}

#[derive(Serialize)]
pub struct ProfileResponse {
    pub user: PublicUser,
    pub stats: ProfileStats,
}

/// GET /api/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let (total_paths, total_steps, completed_steps): (i64, i64, i64) = sqlx::query_as(
        r#"
        SELECT COUNT(*),
               COALESCE(SUM(jsonb_array_length(steps)), 0)::BIGINT,
               COALESCE(SUM(cardinality(completed_steps)), 0)::BIGINT
        FROM learning_paths WHERE user_id = $1
        "#,
    )
    .bind(user.id)
    .fetch_one(&state.db)
    .await?;

    let recent_paths: Vec<RecentProfilePath> = sqlx::query_as(
        "SELECT id, goal, generated_by, created_at
         FROM learning_paths WHERE user_id = $1
         ORDER BY created_at DESC LIMIT 5",
    )
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;

    let stats = ProfileStats {
        total_paths,
        total_steps,
        completed_steps,
        completion_rate: progress::percentage(completed_steps as usize, total_steps as usize),
        account_age: (Utc::now() - user.created_at).num_days(),
        recent_paths,
    };

    Ok(Json(ProfileResponse {
        user: PublicUser::from(&user),
        stats,
    }))
}

#[derive(Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Serialize)]
pub struct ProfileUpdateResponse {
    pub message: String,
    pub user: PublicUser,
}

/// PATCH /api/profile — partial name/email update.
pub async fn handle_update_profile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<ProfileUpdateResponse>, AppError> {
    let name = update
        .name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let email = update
        .email
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    if name.is_none() && email.is_none() {
        return Err(AppError::Validation(
            "No valid updates provided".to_string(),
        ));
    }

    if let Some(email) = &email {
        let taken: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM users WHERE email = $1 AND id <> $2")
                .bind(email)
                .bind(user.id)
                .fetch_optional(&state.db)
                .await?;
        if taken.is_some() {
            return Err(AppError::Conflict("Email already in use".to_string()));
        }
    }

    let updated: crate::models::user::User = sqlx::query_as(
        r#"
        UPDATE users
        SET name = COALESCE($1, name),
            email = COALESCE($2, email)
        WHERE id = $3
        RETURNING *
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(user.id)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(ProfileUpdateResponse {
        message: "Profile updated successfully".to_string(),
        user: PublicUser::from(&updated),
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// POST /api/profile/change-password
pub async fn handle_change_password(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    if req.current_password.is_empty() || req.new_password.is_empty() {
        return Err(AppError::Validation(
            "Current and new passwords are required".to_string(),
        ));
    }
    if req.new_password.len() < password::MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "New password must be at least {} characters",
            password::MIN_PASSWORD_LEN
        )));
    }

    if !password::verify(&req.current_password, &user.password_hash)? {
        return Err(AppError::Unauthorized(
            "Current password is incorrect".to_string(),
        ));
    }

    let new_hash = password::hash(&req.new_password)?;
    sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
        .bind(&new_hash)
        .bind(user.id)
        .execute(&state.db)
        .await?;

    Ok(Json(MessageResponse {
        message: "Password changed successfully".to_string(),
    }))
}

#[derive(Deserialize)]
pub struct DeleteAccountRequest {
    pub password: String,
}

/// DELETE /api/profile/account — password-confirmed. Learning paths go
/// with the user via ON DELETE CASCADE.
pub async fn handle_delete_account(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<DeleteAccountRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    if req.password.is_empty() {
        return Err(AppError::Validation(
            "Password is required to delete account".to_string(),
        ));
    }
    if !password::verify(&req.password, &user.password_hash)? {
        return Err(AppError::Unauthorized("Incorrect password".to_string()));
    }

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user.id)
        .execute(&state.db)
        .await?;

    info!("Deleted account {} ({})", user.username, user.id);
    Ok(Json(MessageResponse {
        message: "Account deleted successfully".to_string(),
    }))
}
