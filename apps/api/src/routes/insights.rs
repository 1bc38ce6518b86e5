//! GET /api/market-insights — live-provider-only; there is no static
//! template for market data, so the endpoint 503s when no provider is
//! configured and 500s when all providers fail.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::ai::prompts;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct InsightsQuery {
    pub skill: Option<String>,
}

/// Lenient on every field but `skill`: provider output varies.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketInsights {
    pub skill: String,
    #[serde(default)]
    pub demand_level: Option<String>,
    #[serde(default)]
    pub average_salary: Option<String>,
    #[serde(default)]
    pub top_companies: Vec<String>,
    #[serde(default)]
    pub related_skills: Vec<String>,
    #[serde(default)]
    pub industry_trends: Vec<String>,
    #[serde(default)]
    pub job_growth: Option<String>,
    #[serde(default)]
    pub career_paths: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsResponse {
    pub success: bool,
    pub generated_by: &'static str,
    pub data: MarketInsights,
}

pub async fn handle_market_insights(
    State(state): State<AppState>,
    Query(query): Query<InsightsQuery>,
) -> Result<Json<InsightsResponse>, AppError> {
    let skill = query
        .skill
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("Skill parameter is required".to_string()))?;

    if !state.ai.has_live_provider() {
        return Err(AppError::ServiceUnavailable(
            "AI service is not available".to_string(),
        ));
    }

    let prompt = prompts::build_insights_prompt(skill);
    let (insights, generated_by) = state
        .ai
        .complete_json::<MarketInsights>(&prompt, prompts::INSIGHTS_SYSTEM)
        .await
        .map_err(|e| AppError::Ai(e.to_string()))?;

    Ok(Json(InsightsResponse {
        success: true,
        generated_by,
        data: insights,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insights_tolerate_partial_payload() {
        let json = r#"{"skill": "Rust", "demandLevel": "high"}"#;
        let insights: MarketInsights = serde_json::from_str(json).unwrap();
        assert_eq!(insights.skill, "Rust");
        assert_eq!(insights.demand_level.as_deref(), Some("high"));
        assert!(insights.top_companies.is_empty());
    }
}
