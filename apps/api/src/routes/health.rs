use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Provider fields report configuration, not liveness — the cascade probes
/// liveness per request.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let database = match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => "connected",
        Err(_) => "disconnected",
    };

    Json(json!({
        "status": "ok",
        "database": database,
        "gemini": if state.ai.gemini_configured() { "configured" } else { "not configured" },
        "openai": if state.ai.openai_configured() { "configured" } else { "not configured" },
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
