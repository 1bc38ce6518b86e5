//! POST /api/generate — the skill-set + career-goal entry point.
//!
//! Flow: validate → provider cascade → parse → persist when authenticated.
//! A persistence failure degrades to returning the unsaved path with a
//! warning, so a flaky database never loses a generation the user paid a
//! provider call for.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::{info, warn};

use crate::ai::PathRequest;
use crate::auth::extract::OptionalAuthUser;
use crate::errors::AppError;
use crate::models::path::{GeneratedPath, PathDetail};
use crate::paths::store;
use crate::state::AppState;

#[derive(Serialize)]
#[serde(untagged)]
pub enum GenerateData {
    Saved(PathDetail),
    Unsaved(GeneratedPath),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,
    pub generated_by: &'static str,
    pub data: GenerateData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

pub async fn handle_generate(
    State(state): State<AppState>,
    OptionalAuthUser(user): OptionalAuthUser,
    Json(request): Json<PathRequest>,
) -> Result<(StatusCode, Json<GenerateResponse>), AppError> {
    if request.goal.trim().is_empty() {
        return Err(AppError::Validation("Goal is required".to_string()));
    }
    if request.skills.iter().all(|s| s.trim().is_empty()) {
        return Err(AppError::Validation(
            "At least one skill is required".to_string(),
        ));
    }

    let (path, generated_by) = state.ai.generate_path(&request).await;
    info!(
        "Generated path \"{}\" via {generated_by} ({} steps)",
        path.title,
        path.steps.len()
    );

    let Some(user) = user else {
        return Ok((
            StatusCode::OK,
            Json(GenerateResponse {
                success: true,
                generated_by,
                data: GenerateData::Unsaved(path),
                warning: None,
            }),
        ));
    };

    match store::insert_path(
        &state.db,
        user.id,
        request.goal.trim(),
        &request.skills,
        &path,
        generated_by,
    )
    .await
    {
        Ok(row) => Ok((
            StatusCode::CREATED,
            Json(GenerateResponse {
                success: true,
                generated_by,
                data: GenerateData::Saved(PathDetail::from(row)),
                warning: None,
            }),
        )),
        Err(e) => {
            warn!("Failed to persist generated path for {}: {e}", user.id);
            Ok((
                StatusCode::OK,
                Json(GenerateResponse {
                    success: true,
                    generated_by,
                    data: GenerateData::Unsaved(path),
                    warning: Some("Path generated but not saved to database".to_string()),
                }),
            ))
        }
    }
}
