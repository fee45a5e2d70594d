pub mod admin;
pub mod auth;
pub mod catalog;
pub mod courses;
pub mod health;
pub mod me;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /catalog                                          public catalog (optional auth)
///
/// /auth/register                                    sign up as student (public)
/// /auth/login                                       login (public)
/// /auth/refresh                                     refresh (public)
/// /auth/logout                                      logout (requires auth)
///
/// /me                                               get, update own profile
/// /me/password                                      change password (PUT)
/// /dashboard                                        enrolled courses with progress
///
/// /courses/{slug}                                   course outline (enrolled)
/// /courses/{slug}/lessons/{lesson_id}               lesson view (enrolled)
/// /courses/{slug}/lessons/{lesson_id}/comments      post comment (POST)
/// /courses/{slug}/lessons/{lesson_id}/complete      mark completed (POST)
///
/// /admin/dashboard                                  counts and recent activity
/// /admin/courses                                    list, create
/// /admin/courses/{id}                               get, delete
/// /admin/courses/{id}/publish                       publish (POST)
/// /admin/courses/{id}/modules                       create module (POST)
/// /admin/modules/{id}/lessons                       create lesson (POST)
/// /admin/lessons/{id}                               update lesson (PUT)
/// /admin/lessons/{id}/video                         attach video (PUT)
/// /admin/videos                                     create upload (POST)
/// /admin/students                                   list students
/// /admin/students/{user_id}/enrollments/{course_id} grant (PUT), revoke (DELETE)
/// /admin/settings                                   list, batch save (PUT)
/// /admin/settings/{key}                             update one (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(catalog::router())
        .nest("/auth", auth::router())
        .merge(me::router())
        .nest("/courses", courses::router())
        .nest("/admin", admin::router())
}
