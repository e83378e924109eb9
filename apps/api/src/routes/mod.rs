pub mod health;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::resume::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Document store
        .route(
            "/api/v1/resume",
            get(handlers::handle_get_resume).put(handlers::handle_replace),
        )
        .route(
            "/api/v1/resume/fields/:field",
            patch(handlers::handle_update_field),
        )
        .route(
            "/api/v1/resume/:section/entries",
            post(handlers::handle_add_entry),
        )
        .route(
            "/api/v1/resume/:section/entries/:id",
            patch(handlers::handle_update_entry).delete(handlers::handle_remove_entry),
        )
        .route("/api/v1/resume/reset", post(handlers::handle_reset))
        // Validation
        .route("/api/v1/resume/validate", post(handlers::handle_validate))
        .route("/api/v1/resume/errors", delete(handlers::handle_clear_errors))
        // Import / export
        .route("/api/v1/resume/export", get(handlers::handle_export))
        .route("/api/v1/resume/import", post(handlers::handle_import_preview))
        .route(
            "/api/v1/resume/import/confirm",
            post(handlers::handle_import_confirm),
        )
        // Editor / preview / print
        .route("/api/v1/resume/editor", get(handlers::handle_editor))
        .route("/api/v1/resume/preview", get(handlers::handle_preview))
        .route("/api/v1/resume/print", post(handlers::handle_print))
        .with_state(state)
}
