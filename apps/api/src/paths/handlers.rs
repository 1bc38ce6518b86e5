use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::extract::AuthUser;
use crate::errors::AppError;
use crate::models::path::{PathDetail, PathMetadata};
use crate::paths::{progress, store};
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathListResponse {
    pub success: bool,
    pub count: usize,
    pub paths: Vec<PathDetail>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathResponse {
    pub success: bool,
    pub path: PathDetail,
}

/// GET /api/paths/my-paths
pub async fn handle_my_paths(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<PathListResponse>, AppError> {
    let rows = store::list_for_user(&state.db, user.id).await?;
    let paths: Vec<PathDetail> = rows.into_iter().map(PathDetail::from).collect();
    Ok(Json(PathListResponse {
        success: true,
        count: paths.len(),
        paths,
    }))
}

/// GET /api/paths/:id
pub async fn handle_get_path(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<PathResponse>, AppError> {
    let row = store::get_for_user(&state.db, id, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Learning path not found".to_string()))?;
    Ok(Json(PathResponse {
        success: true,
        path: PathDetail::from(row),
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepToggleResponse {
    pub success: bool,
    pub message: String,
    pub path: StepToggleDetail,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepToggleDetail {
    pub id: Uuid,
    pub completed_steps: Vec<i32>,
    pub total_steps: usize,
    pub completed_count: usize,
    pub progress_percentage: u32,
}

/// PATCH /api/paths/:id/steps/:step_index
///
/// The index arrives as a raw string so a non-numeric value maps to the
/// original's 400 rather than axum's default path rejection.
pub async fn handle_toggle_step(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path((id, step_index)): Path<(Uuid, String)>,
) -> Result<Json<StepToggleResponse>, AppError> {
    let step: i32 = step_index
        .parse()
        .map_err(|_| AppError::Validation("Invalid step index".to_string()))?;
    if step < 0 {
        return Err(AppError::Validation("Invalid step index".to_string()));
    }

    let row = store::get_for_user(&state.db, id, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Learning path not found".to_string()))?;

    let total_steps = row.steps.0.len();
    if step as usize >= total_steps {
        return Err(AppError::Validation("Step index out of range".to_string()));
    }

    let mut completed_steps = row.completed_steps;
    let now_complete = progress::toggle_step(&mut completed_steps, step);
    store::update_completed_steps(&state.db, id, user.id, &completed_steps).await?;

    let completed_count = completed_steps.len();
    Ok(Json(StepToggleResponse {
        success: true,
        message: if now_complete {
            "Step marked as complete".to_string()
        } else {
            "Step marked as incomplete".to_string()
        },
        path: StepToggleDetail {
            id,
            completed_steps,
            total_steps,
            completed_count,
            progress_percentage: progress::percentage(completed_count, total_steps),
        },
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataUpdate {
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
    pub target_date: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Serialize)]
pub struct MetadataResponse {
    pub success: bool,
    pub message: String,
    pub metadata: PathMetadata,
}

/// PATCH /api/paths/:id/metadata
pub async fn handle_update_metadata(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(update): Json<MetadataUpdate>,
) -> Result<Json<MetadataResponse>, AppError> {
    let row = store::get_for_user(&state.db, id, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Learning path not found".to_string()))?;

    store::update_metadata(
        &state.db,
        id,
        user.id,
        update.notes.as_deref(),
        update.tags.as_deref(),
        update.target_date,
    )
    .await?;

    Ok(Json(MetadataResponse {
        success: true,
        message: "Metadata updated successfully".to_string(),
        metadata: PathMetadata {
            notes: update.notes.or(row.notes),
            tags: update.tags.or(row.tags),
            target_date: update.target_date.or(row.target_date),
        },
    }))
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

/// DELETE /api/paths/:id
pub async fn handle_delete_path(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, AppError> {
    let deleted = store::delete_for_user(&state.db, id, user.id).await?;
    if !deleted {
        return Err(AppError::NotFound("Learning path not found".to_string()));
    }
    Ok(Json(DeleteResponse {
        success: true,
        message: "Learning path deleted successfully".to_string(),
    }))
}
