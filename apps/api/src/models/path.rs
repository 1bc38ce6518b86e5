use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// One resource attached to a learning step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StepResource {
    pub title: String,
    /// video / article / course / book / practice
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// One of the six steps of a learning path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PathStep {
    pub title: String,
    pub description: String,
    /// Free-form, e.g. "2 weeks".
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub resources: Vec<StepResource>,
}

/// A learning path as produced by the provider chain (or the static
/// template), before any persistence. Lenient on optional fields since LLM
/// output varies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPath {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub estimated_duration: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    pub steps: Vec<PathStep>,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub outcomes: Vec<String>,
}

/// Database row for a persisted path.
#[derive(Debug, Clone, FromRow)]
pub struct LearningPathRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub goal: String,
    pub skills: Vec<String>,
    pub steps: Json<Vec<PathStep>>,
    pub completed_steps: Vec<i32>,
    pub generated_by: String,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
    pub target_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User-editable metadata on a persisted path.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PathMetadata {
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
    pub target_date: Option<DateTime<Utc>>,
}

/// Client-facing path with derived progress fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathDetail {
    pub id: Uuid,
    pub goal: String,
    pub skills: Vec<String>,
    pub steps: Vec<PathStep>,
    pub completed_steps: Vec<i32>,
    pub total_steps: usize,
    pub completed_count: usize,
    pub progress_percentage: u32,
    pub generated_by: String,
    pub metadata: PathMetadata,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<LearningPathRow> for PathDetail {
    fn from(row: LearningPathRow) -> Self {
        let steps = row.steps.0;
        let total_steps = steps.len();
        let completed_count = row.completed_steps.len();
        PathDetail {
            id: row.id,
            goal: row.goal,
            skills: row.skills,
            steps,
            completed_steps: row.completed_steps,
            total_steps,
            completed_count,
            progress_percentage: crate::paths::progress::percentage(completed_count, total_steps),
            generated_by: row.generated_by,
            metadata: PathMetadata {
                notes: row.notes,
                tags: row.tags,
                target_date: row.target_date,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_path_tolerates_missing_optionals() {
        let json = r#"{
            "title": "Learn Rust",
            "steps": [
                {"title": "Basics", "description": "Syntax and ownership"}
            ]
        }"#;
        let path: GeneratedPath = serde_json::from_str(json).unwrap();
        assert_eq!(path.title, "Learn Rust");
        assert_eq!(path.steps.len(), 1);
        assert!(path.steps[0].resources.is_empty());
        assert!(path.prerequisites.is_empty());
    }

    #[test]
    fn test_step_resource_type_key() {
        let json = r#"{"title": "The Book", "type": "book", "url": "https://doc.rust-lang.org/book/"}"#;
        let res: StepResource = serde_json::from_str(json).unwrap();
        assert_eq!(res.kind, "book");
        let back = serde_json::to_value(&res).unwrap();
        assert_eq!(back["type"], "book");
    }
}
