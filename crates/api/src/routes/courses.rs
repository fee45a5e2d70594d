//! Route definitions for the student `/courses` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::course;
use crate::state::AppState;

/// Routes mounted at `/courses`. All require an enrollment.
///
/// ```text
/// GET  /{slug}                                -> get_outline
/// GET  /{slug}/lessons/{lesson_id}            -> get_lesson
/// POST /{slug}/lessons/{lesson_id}/comments   -> post_comment
/// POST /{slug}/lessons/{lesson_id}/complete   -> complete_lesson
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{slug}", get(course::get_outline))
        .route("/{slug}/lessons/{lesson_id}", get(course::get_lesson))
        .route(
            "/{slug}/lessons/{lesson_id}/comments",
            post(course::post_comment),
        )
        .route(
            "/{slug}/lessons/{lesson_id}/complete",
            post(course::complete_lesson),
        )
}
