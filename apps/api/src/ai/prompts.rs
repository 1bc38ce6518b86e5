//! Prompt templates for the AI endpoints.

use super::PathRequest;

pub const LEARNING_PATH_SYSTEM: &str =
    "You are a helpful learning path generator. Always respond with valid JSON only.";

pub const INSIGHTS_SYSTEM: &str =
    "You are a market research analyst. Always respond with valid JSON only.";

/// Builds the generation prompt from the caller's skill set and goal.
/// The response contract is exactly 6 steps.
pub fn build_path_prompt(request: &PathRequest) -> String {
    let mut prompt = format!(
        "Create a comprehensive learning path for someone who wants to become: {}\n\
         Their current skills: {}",
        request.goal.trim(),
        request.skills.join(", ")
    );

    if let Some(timeframe) = &request.timeframe {
        prompt.push_str(&format!("\nTimeframe: {timeframe}"));
    }
    if let Some(difficulty) = &request.difficulty {
        prompt.push_str(&format!("\nDifficulty Level: {difficulty}"));
    }
    if let Some(style) = &request.preferred_style {
        prompt.push_str(&format!("\nPreferred Learning Style: {style}"));
    }

    prompt.push_str(
        r#"

Generate a structured learning path in JSON format with EXACTLY 6 steps, using this structure:
{
  "title": "Learning Path Title",
  "description": "Brief overview",
  "estimatedDuration": "X weeks/months",
  "difficulty": "beginner/intermediate/advanced",
  "steps": [
    {
      "title": "Step Title",
      "description": "What you'll learn in this step",
      "duration": "X weeks",
      "skills": ["skill1", "skill2"],
      "resources": [
        {
          "title": "Resource Title",
          "type": "video/article/course/book/practice",
          "url": "https://example.com or 'Search for...'",
          "description": "Brief description"
        }
      ]
    }
  ],
  "prerequisites": ["prerequisite1", "prerequisite2"],
  "outcomes": ["outcome1", "outcome2"]
}

Important: the "steps" array must contain exactly 6 entries, ordered from first to last. Return ONLY valid JSON, no markdown formatting, no additional text."#,
    );

    prompt
}

/// Builds the market-insights prompt for a single skill.
pub fn build_insights_prompt(skill: &str) -> String {
    format!(
        r#"Provide market insights for the skill: {skill}

Return a JSON object with the following structure:
{{
  "skill": "{skill}",
  "demandLevel": "high/medium/low",
  "averageSalary": "$XX,XXX - $XX,XXX",
  "topCompanies": ["Company1", "Company2", "Company3"],
  "relatedSkills": ["skill1", "skill2", "skill3"],
  "industryTrends": ["trend1", "trend2"],
  "jobGrowth": "XX% expected growth",
  "careerPaths": ["path1", "path2"]
}}

Return ONLY valid JSON, no markdown formatting."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PathRequest {
        PathRequest {
            goal: "Backend Developer".into(),
            skills: vec!["Python".into(), "SQL".into()],
            timeframe: Some("3 months".into()),
            difficulty: None,
            preferred_style: Some("hands-on".into()),
        }
    }

    #[test]
    fn test_path_prompt_contains_inputs() {
        let prompt = build_path_prompt(&request());
        assert!(prompt.contains("Backend Developer"));
        assert!(prompt.contains("Python, SQL"));
        assert!(prompt.contains("Timeframe: 3 months"));
        assert!(prompt.contains("Preferred Learning Style: hands-on"));
        assert!(!prompt.contains("Difficulty Level"));
    }

    #[test]
    fn test_path_prompt_demands_six_steps() {
        let prompt = build_path_prompt(&request());
        assert!(prompt.contains("EXACTLY 6 steps"));
        assert!(prompt.contains("exactly 6 entries"));
    }

    #[test]
    fn test_insights_prompt_embeds_skill() {
        let prompt = build_insights_prompt("Kubernetes");
        assert!(prompt.contains("the skill: Kubernetes"));
        assert!(prompt.contains("demandLevel"));
    }
}
