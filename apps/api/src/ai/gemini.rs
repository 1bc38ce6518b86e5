//! Gemini provider: direct REST calls against the generativelanguage API.
//!
//! The v1 endpoint is tried first, then v1beta with the same body — some
//! models are only routable through one of the two.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AiError, PathProvider};

const API_BASE: &str = "https://generativelanguage.googleapis.com";
const API_VERSIONS: [&str; 2] = ["v1", "v1beta"];

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiProvider {
    pub fn new(client: Client, api_key: String, model: String) -> Self {
        Self {
            client,
            api_key,
            model,
        }
    }

    async fn call_endpoint(&self, version: &str, text: &str) -> Result<String, AiError> {
        let url = format!(
            "{API_BASE}/{version}/models/{}:generateContent?key={}",
            self.model, self.api_key
        );

        let body = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part { text }],
            }],
        };

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AiError::Api {
                provider: "gemini",
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GeminiResponse = response.json().await?;
        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or(AiError::EmptyContent)
    }
}

#[async_trait]
impl PathProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    /// Gemini has no system-role slot; the system prompt is prepended to
    /// the user prompt instead.
    async fn complete(&self, prompt: &str, system: &str) -> Result<String, AiError> {
        let text = if system.is_empty() {
            prompt.to_string()
        } else {
            format!("{system}\n\n{prompt}")
        };

        let mut last_error = AiError::EmptyContent;
        for version in API_VERSIONS {
            match self.call_endpoint(version, &text).await {
                Ok(out) => {
                    debug!("Gemini {version} endpoint succeeded");
                    return Ok(out);
                }
                Err(e) => {
                    debug!("Gemini {version} endpoint failed: {e}");
                    last_error = e;
                }
            }
        }
        Err(last_error)
    }
}
