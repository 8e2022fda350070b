pub mod assistant;
pub mod protocol;
pub mod rest;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use state::AppState;
use std::sync::Arc;

/// Builds the API routes. CORS and the Swagger UI are layered on by the binary.
pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/state", get(rest::get_state_handler))
        .route("/courses", get(rest::list_courses_handler))
        .route("/search-terms", get(rest::search_terms_handler))
        .route("/navigate", post(rest::navigate_handler))
        .route("/search", post(rest::search_handler))
        .route("/explore", post(rest::explore_handler))
        .route("/courses/{id}/select", post(rest::select_course_handler))
        .route("/courses/{id}/enroll", post(rest::enroll_handler))
        .route("/courses/{id}/access", get(rest::course_access_handler))
        .route("/player/videos/{id}", post(rest::choose_video_handler))
        .route("/dashboard", get(rest::dashboard_handler))
        .route("/dashboard/courses", post(rest::publish_handler))
        .route("/chrome/scroll", post(rest::scroll_handler))
        .route("/chrome/resize", post(rest::resize_handler))
        .route("/chrome/sidebar/close", post(rest::close_sidebar_handler))
        .route("/ai/suggestions", post(assistant::suggestions_handler))
        .route("/ai/analysis", post(assistant::analysis_handler))
        .route(
            "/tutor/messages",
            get(assistant::transcript_handler).post(assistant::ask_tutor_handler),
        )
        .with_state(app_state)
}
