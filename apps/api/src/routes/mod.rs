pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::resumes::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume documents
        .route(
            "/api/v1/resumes/:owner_id",
            get(handlers::handle_get_resume).put(handlers::handle_save_resume),
        )
        .route(
            "/api/v1/resumes/:owner_id/logins",
            get(handlers::handle_login_history).post(handlers::handle_record_login),
        )
        // Layout editing and rendering
        .route("/api/v1/layout/apply", post(handlers::handle_apply_edits))
        .route("/api/v1/render/plan", post(handlers::handle_render_plan))
        .route("/api/v1/templates", get(handlers::handle_list_templates))
        // Public CV
        .route("/api/v1/cv/:username", get(handlers::handle_public_cv))
        .with_state(state)
}
