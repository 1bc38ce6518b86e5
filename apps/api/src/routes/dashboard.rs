//! Dashboard aggregation queries.
//!
//! The public stats endpoint degrades to canned demo data when the
//! database is unreachable instead of failing — the landing page stays up
//! through an outage.

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::Serialize;
use serde_json::json;
use tracing::warn;

use crate::auth::extract::AuthUser;
use crate::errors::AppError;
use crate::models::path::PathDetail;
use crate::paths::store;
use crate::state::AppState;

#[derive(Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RecentPath {
    pub goal: String,
    pub skills: Vec<String>,
    pub generated_by: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillCount {
    pub skill: String,
    pub count: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalCount {
    pub goal: String,
    pub count: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStats {
    pub total_paths: i64,
    pub recent_paths: Vec<RecentPath>,
    pub popular_skills: Vec<SkillCount>,
    pub popular_goals: Vec<GoalCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: PlatformStats,
}

/// GET /api/dashboard/stats — public.
pub async fn handle_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    match load_stats(&state).await {
        Ok(stats) => Json(StatsResponse {
            success: true,
            stats,
        }),
        Err(e) => {
            warn!("Dashboard stats unavailable, serving demo data: {e}");
            Json(StatsResponse {
                success: true,
                stats: demo_stats(),
            })
        }
    }
}

async fn load_stats(state: &AppState) -> Result<PlatformStats, sqlx::Error> {
    let (total_paths,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM learning_paths")
        .fetch_one(&state.db)
        .await?;

    let recent_paths: Vec<RecentPath> = sqlx::query_as(
        "SELECT goal, skills, generated_by, created_at
         FROM learning_paths ORDER BY created_at DESC LIMIT 10",
    )
    .fetch_all(&state.db)
    .await?;

    let popular_skills: Vec<(String, i64)> = sqlx::query_as(
        "SELECT skill, COUNT(*) AS count
         FROM learning_paths, unnest(skills) AS skill
         GROUP BY skill ORDER BY count DESC LIMIT 8",
    )
    .fetch_all(&state.db)
    .await?;

    let popular_goals: Vec<(String, i64)> = sqlx::query_as(
        "SELECT goal, COUNT(*) AS count
         FROM learning_paths GROUP BY goal ORDER BY count DESC LIMIT 8",
    )
    .fetch_all(&state.db)
    .await?;

    Ok(PlatformStats {
        total_paths,
        recent_paths,
        popular_skills: popular_skills
            .into_iter()
            .map(|(skill, count)| SkillCount { skill, count })
            .collect(),
        popular_goals: popular_goals
            .into_iter()
            .map(|(goal, count)| GoalCount { goal, count })
            .collect(),
        message: None,
    })
}

fn demo_stats() -> PlatformStats {
    let skills = [
        ("JavaScript", 15),
        ("Python", 12),
        ("React", 10),
        ("HTML", 8),
        ("CSS", 7),
    ];
    let goals = [
        ("Full Stack Developer", 8),
        ("Frontend Developer", 6),
        ("Data Scientist", 4),
        ("Backend Developer", 3),
    ];
    PlatformStats {
        total_paths: 0,
        recent_paths: Vec::new(),
        popular_skills: skills
            .into_iter()
            .map(|(skill, count)| SkillCount {
                skill: skill.to_string(),
                count,
            })
            .collect(),
        popular_goals: goals
            .into_iter()
            .map(|(goal, count)| GoalCount {
                goal: goal.to_string(),
                count,
            })
            .collect(),
        message: Some("Showing demo data - database may not be connected".to_string()),
    }
}

/// First instant of the month `now` falls in.
fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
}

/// GET /api/dashboard/my-paths — authenticated. Bounded to the 10 most
/// recent paths; the month counter is computed within that window.
pub async fn handle_my_dashboard(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<serde_json::Value>, AppError> {
    let rows = store::list_recent_for_user(&state.db, user.id, 10).await?;

    let since = month_start(Utc::now());
    let paths_this_month = rows.iter().filter(|r| r.created_at >= since).count();

    let paths: Vec<PathDetail> = rows.into_iter().map(PathDetail::from).collect();
    let total_paths = paths.len();
    let recent_path = paths.first().cloned();

    Ok(Json(json!({
        "success": true,
        "userPaths": paths,
        "userStats": {
            "totalPaths": total_paths,
            "pathsThisMonth": paths_this_month,
            "recentPath": recent_path,
        }
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_start_is_first_of_month() {
        let now = Utc.with_ymd_and_hms(2026, 8, 25, 13, 45, 10).unwrap();
        let start = month_start(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_month_start_splits_path_ages() {
        let now = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();
        let since = month_start(now);
        let this_month = Utc.with_ymd_and_hms(2026, 8, 3, 9, 0, 0).unwrap();
        let last_month = Utc.with_ymd_and_hms(2026, 7, 31, 23, 59, 59).unwrap();
        assert!(this_month >= since);
        assert!(last_month < since);
    }
}
