pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::applications::handlers as applications;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Application tracker
        .route(
            "/applications",
            get(applications::handle_list).post(applications::handle_create),
        )
        .route(
            "/applications/:id",
            get(applications::handle_get)
                .put(applications::handle_update)
                .delete(applications::handle_delete),
        )
        // Document intelligence
        .route("/match/", post(analysis::handle_match))
        .route("/generate-cover-letter/", post(analysis::handle_cover_letter))
        .route(
            "/resume/apply-suggestions",
            post(analysis::handle_apply_suggestions),
        )
        .layer(body_limit)
        .with_state(state)
}
