use sqlx::PgPool;

use crate::ai::AiClient;
use crate::config::Config;
use crate::middleware::rate_limit::RateLimiter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub ai: AiClient,
    pub config: Config,
    /// Global per-IP limiter: 50 requests per 15 minutes.
    pub global_limiter: RateLimiter,
    /// Tighter limiter for AI generation: 5 requests per minute.
    pub ai_limiter: RateLimiter,
}
