//! Owner-scoped persistence for learning paths. Every read and write is
//! keyed by (path id, user id) so one user can never touch another's rows.

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::path::{GeneratedPath, LearningPathRow};

pub async fn insert_path(
    pool: &PgPool,
    user_id: Uuid,
    goal: &str,
    skills: &[String],
    path: &GeneratedPath,
    generated_by: &str,
) -> Result<LearningPathRow, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO learning_paths (id, user_id, goal, skills, steps, generated_by)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(goal)
    .bind(skills)
    .bind(Json(&path.steps))
    .bind(generated_by)
    .fetch_one(pool)
    .await
}

pub async fn list_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<LearningPathRow>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM learning_paths WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn list_recent_for_user(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
) -> Result<Vec<LearningPathRow>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM learning_paths WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2",
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn get_for_user(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
) -> Result<Option<LearningPathRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM learning_paths WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn update_completed_steps(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
    completed_steps: &[i32],
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE learning_paths SET completed_steps = $1, updated_at = now()
         WHERE id = $2 AND user_id = $3",
    )
    .bind(completed_steps)
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn update_metadata(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
    notes: Option<&str>,
    tags: Option<&[String]>,
    target_date: Option<DateTime<Utc>>,
) -> Result<(), sqlx::Error> {
    // COALESCE keeps the stored value for fields the request omitted.
    sqlx::query(
        r#"
        UPDATE learning_paths
        SET notes = COALESCE($1, notes),
            tags = COALESCE($2, tags),
            target_date = COALESCE($3, target_date),
            updated_at = now()
        WHERE id = $4 AND user_id = $5
        "#,
    )
    .bind(notes)
    .bind(tags)
    .bind(target_date)
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Returns `true` when a row was deleted.
pub async fn delete_for_user(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM learning_paths WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
