//! AI client — the single point of entry for all LLM provider calls.
//!
//! No other module talks to a provider API directly. The client holds an
//! ordered chain of providers (Gemini, then OpenAI, as configured) and
//! walks it sequentially per request: first success wins, each failure is
//! logged and the next provider is tried. There is no retry backoff and no
//! circuit breaking. Path generation is backstopped by a static template
//! that always succeeds; market insights has no backstop and surfaces the
//! last provider error instead.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::models::path::GeneratedPath;

pub mod fallback;
pub mod gemini;
pub mod openai;
pub mod parse;
pub mod prompts;

use gemini::GeminiProvider;
use openai::OpenAiProvider;

/// Provider label recorded on paths produced by the static template.
pub const FALLBACK_PROVIDER: &str = "fallback";

const HTTP_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} API error (status {status}): {message}")]
    Api {
        provider: &'static str,
        status: u16,
        message: String,
    },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Provider returned empty content")]
    EmptyContent,

    #[error("No AI provider is configured")]
    NotConfigured,
}

/// One provider in the chain. `complete` returns the raw model text; the
/// caller owns fence stripping and JSON extraction.
#[async_trait]
pub trait PathProvider: Send + Sync {
    fn name(&self) -> &'static str;
    async fn complete(&self, prompt: &str, system: &str) -> Result<String, AiError>;
}

/// Incoming generation request: a skill set and a career goal, plus
/// optional shaping hints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathRequest {
    pub goal: String,
    pub skills: Vec<String>,
    #[serde(default)]
    pub timeframe: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub preferred_style: Option<String>,
}

/// The ordered provider chain used by all AI endpoints.
#[derive(Clone)]
pub struct AiClient {
    providers: Vec<Arc<dyn PathProvider>>,
    gemini_configured: bool,
    openai_configured: bool,
}

impl AiClient {
    pub fn new(config: &Config) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");

        let mut providers: Vec<Arc<dyn PathProvider>> = Vec::new();

        if let Some(key) = &config.gemini_api_key {
            providers.push(Arc::new(GeminiProvider::new(
                http.clone(),
                key.clone(),
                config.gemini_model.clone(),
            )));
        }
        if let Some(key) = &config.openai_api_key {
            providers.push(Arc::new(OpenAiProvider::new(http.clone(), key.clone())));
        }

        AiClient {
            gemini_configured: config.gemini_api_key.is_some(),
            openai_configured: config.openai_api_key.is_some(),
            providers,
        }
    }

    pub fn gemini_configured(&self) -> bool {
        self.gemini_configured
    }

    pub fn openai_configured(&self) -> bool {
        self.openai_configured
    }

    /// True when at least one live provider (not the static template) exists.
    pub fn has_live_provider(&self) -> bool {
        !self.providers.is_empty()
    }

    /// Walks the provider chain and deserializes the first response that
    /// parses as `T`. A provider whose output fails to parse counts as a
    /// provider failure and the chain continues.
    pub async fn complete_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: &str,
    ) -> Result<(T, &'static str), AiError> {
        let mut last_error = AiError::NotConfigured;

        for provider in &self.providers {
            match provider.complete(prompt, system).await {
                Ok(text) => {
                    let cleaned = parse::extract_json_payload(&text);
                    match serde_json::from_str::<T>(cleaned) {
                        Ok(value) => {
                            info!("AI response served by {}", provider.name());
                            return Ok((value, provider.name()));
                        }
                        Err(e) => {
                            warn!(
                                "{} returned unparseable JSON, trying next provider: {e}",
                                provider.name()
                            );
                            last_error = AiError::Parse(e);
                        }
                    }
                }
                Err(e) => {
                    warn!("{} call failed, trying next provider: {e}", provider.name());
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }

    /// Generates a 6-step learning path. Never fails: when every live
    /// provider is exhausted (or none is configured), the static template
    /// backstops the chain.
    pub async fn generate_path(&self, request: &PathRequest) -> (GeneratedPath, &'static str) {
        let prompt = prompts::build_path_prompt(request);

        match self
            .complete_json::<GeneratedPath>(&prompt, prompts::LEARNING_PATH_SYSTEM)
            .await
        {
            Ok((path, provider)) => (path, provider),
            Err(e) => {
                warn!("All providers failed ({e}); using static fallback template");
                (fallback::template_path(request), FALLBACK_PROVIDER)
            }
        }
    }
}
