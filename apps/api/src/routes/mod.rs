pub mod dashboard;
pub mod generate;
pub mod health;
pub mod insights;
pub mod profile;

use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};

use crate::auth::handlers as auth_handlers;
use crate::middleware::rate_limit::rate_limit;
use crate::paths::handlers as path_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // /api/generate carries the tighter AI window on top of the global one.
    let generate = Router::new()
        .route("/api/generate", post(generate::handle_generate))
        .layer(middleware::from_fn_with_state(
            state.ai_limiter.clone(),
            rate_limit,
        ));

    let api = Router::new()
        // Auth
        .route("/api/auth/register", post(auth_handlers::handle_register))
        .route("/api/auth/login", post(auth_handlers::handle_login))
        .route("/api/auth/me", get(auth_handlers::handle_me))
        // Generation & insights
        .merge(generate)
        .route(
            "/api/market-insights",
            get(insights::handle_market_insights),
        )
        // Paths
        .route("/api/paths/my-paths", get(path_handlers::handle_my_paths))
        .route(
            "/api/paths/:id",
            get(path_handlers::handle_get_path).delete(path_handlers::handle_delete_path),
        )
        .route(
            "/api/paths/:id/steps/:step_index",
            patch(path_handlers::handle_toggle_step),
        )
        .route(
            "/api/paths/:id/metadata",
            patch(path_handlers::handle_update_metadata),
        )
        // Dashboard
        .route("/api/dashboard/stats", get(dashboard::handle_stats))
        .route(
            "/api/dashboard/my-paths",
            get(dashboard::handle_my_dashboard),
        )
        // Profile
        .route(
            "/api/profile",
            get(profile::handle_get_profile).patch(profile::handle_update_profile),
        )
        .route(
            "/api/profile/change-password",
            post(profile::handle_change_password),
        )
        .route(
            "/api/profile/account",
            delete(profile::handle_delete_account),
        )
        .layer(middleware::from_fn_with_state(
            state.global_limiter.clone(),
            rate_limit,
        ));

    Router::new()
        .route("/health", get(health::health_handler))
        .merge(api)
        .with_state(state)
}
