//! Route definitions for the `/admin` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{admin_course, admin_dashboard, admin_settings, admin_student};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require the `master` role (enforced by handler extractors).
///
/// ```text
/// GET    /dashboard                                -> get_dashboard
/// GET    /courses                                  -> list_courses
/// POST   /courses                                  -> create_course
/// GET    /courses/{id}                             -> get_course
/// DELETE /courses/{id}                             -> delete_course
/// POST   /courses/{id}/publish                     -> publish_course
/// POST   /courses/{id}/modules                     -> create_module
/// POST   /modules/{id}/lessons                     -> create_lesson
/// PUT    /lessons/{id}                             -> update_lesson
/// PUT    /lessons/{id}/video                       -> set_lesson_video
/// POST   /videos                                   -> create_video
/// GET    /students                                 -> list_students
/// PUT    /students/{user_id}/enrollments/{course_id} -> grant_access
/// DELETE /students/{user_id}/enrollments/{course_id} -> revoke_access
/// GET    /settings                                 -> list_settings
/// PUT    /settings                                 -> save_settings
/// PUT    /settings/{key}                           -> update_setting
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(admin_dashboard::get_dashboard))
        .route(
            "/courses",
            get(admin_course::list_courses).post(admin_course::create_course),
        )
        .route(
            "/courses/{id}",
            get(admin_course::get_course).delete(admin_course::delete_course),
        )
        .route("/courses/{id}/publish", post(admin_course::publish_course))
        .route("/courses/{id}/modules", post(admin_course::create_module))
        .route("/modules/{id}/lessons", post(admin_course::create_lesson))
        .route("/lessons/{id}", put(admin_course::update_lesson))
        .route("/lessons/{id}/video", put(admin_course::set_lesson_video))
        .route("/videos", post(admin_course::create_video))
        .route("/students", get(admin_student::list_students))
        .route(
            "/students/{user_id}/enrollments/{course_id}",
            put(admin_student::grant_access).delete(admin_student::revoke_access),
        )
        .route(
            "/settings",
            get(admin_settings::list_settings).put(admin_settings::save_settings),
        )
        .route("/settings/{key}", put(admin_settings::update_setting))
}
