//! Static fallback template: a deterministic 6-step path synthesized from
//! the request when no live provider can answer. The service stays useful
//! without any API key configured.

use crate::models::path::{GeneratedPath, PathStep, StepResource};

use super::PathRequest;

/// Number of steps in every generated path.
pub const STEP_COUNT: usize = 6;

pub fn template_path(request: &PathRequest) -> GeneratedPath {
    let goal = request.goal.trim();
    let difficulty = request
        .difficulty
        .clone()
        .unwrap_or_else(|| "beginner".to_string());
    let known = if request.skills.is_empty() {
        "your existing experience".to_string()
    } else {
        request.skills.join(", ")
    };

    let steps = vec![
        step(
            format!("Foundations of {goal}"),
            format!(
                "Understand what a {goal} does day to day and map the core concepts you need. \
                 Build on what you already know: {known}."
            ),
            "1 week",
            vec![search_resource(format!("{goal} roadmap overview"), "article")],
        ),
        step(
            "Core skills deep-dive".to_string(),
            format!("Work through the essential tools and techniques every {goal} relies on."),
            "2 weeks",
            vec![search_resource(format!("{goal} fundamentals course"), "course")],
        ),
        step(
            "Guided practice".to_string(),
            "Apply each new concept in small, focused exercises before moving on.".to_string(),
            "2 weeks",
            vec![search_resource(format!("{goal} practice exercises"), "practice")],
        ),
        step(
            "Build a real project".to_string(),
            format!("Create a portfolio project that demonstrates {goal} skills end to end."),
            "3 weeks",
            vec![search_resource(format!("{goal} project ideas"), "article")],
        ),
        step(
            "Advanced topics".to_string(),
            format!("Go beyond the basics: the patterns and tradeoffs senior {goal}s care about."),
            "2 weeks",
            vec![search_resource(format!("advanced {goal} topics"), "video")],
        ),
        step(
            "Portfolio and interview preparation".to_string(),
            "Polish your project, write it up, and rehearse explaining your decisions.".to_string(),
            "1 week",
            vec![search_resource(format!("{goal} interview questions"), "article")],
        ),
    ];

    GeneratedPath {
        title: format!("Become a {goal}"),
        description: format!("A structured learning path toward the goal: {goal}"),
        estimated_duration: request
            .timeframe
            .clone()
            .or_else(|| Some("11 weeks".to_string())),
        difficulty: Some(difficulty),
        steps,
        prerequisites: request.skills.clone(),
        outcomes: vec![
            format!("Understand the fundamentals required of a {goal}"),
            format!("Apply {goal} skills in a practical project"),
            format!("Be prepared to interview for {goal} roles"),
        ],
    }
}

fn step(title: String, description: String, duration: &str, resources: Vec<StepResource>) -> PathStep {
    PathStep {
        title,
        description,
        duration: Some(duration.to_string()),
        skills: Vec::new(),
        resources,
    }
}

fn search_resource(query: String, kind: &str) -> StepResource {
    StepResource {
        title: query.clone(),
        kind: kind.to_string(),
        url: None,
        description: Some(format!("Search for: {query}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PathRequest {
        PathRequest {
            goal: "Data Engineer".into(),
            skills: vec!["Python".into(), "SQL".into()],
            timeframe: None,
            difficulty: None,
            preferred_style: None,
        }
    }

    #[test]
    fn test_template_has_exactly_six_steps() {
        let path = template_path(&request());
        assert_eq!(path.steps.len(), STEP_COUNT);
    }

    #[test]
    fn test_template_reflects_goal_and_skills() {
        let path = template_path(&request());
        assert_eq!(path.title, "Become a Data Engineer");
        assert_eq!(path.prerequisites, vec!["Python", "SQL"]);
        assert!(path.steps[0].description.contains("Python, SQL"));
    }

    #[test]
    fn test_template_respects_timeframe_and_difficulty() {
        let mut req = request();
        req.timeframe = Some("6 months".into());
        req.difficulty = Some("intermediate".into());
        let path = template_path(&req);
        assert_eq!(path.estimated_duration.as_deref(), Some("6 months"));
        assert_eq!(path.difficulty.as_deref(), Some("intermediate"));
    }

    #[test]
    fn test_template_handles_empty_skills() {
        let mut req = request();
        req.skills.clear();
        let path = template_path(&req);
        assert!(path.steps[0].description.contains("your existing experience"));
        assert!(path.prerequisites.is_empty());
    }
}
