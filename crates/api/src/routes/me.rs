//! Self-service routes for the authenticated profile.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{profile, student};
use crate::state::AppState;

/// ```text
/// GET  /me           -> get_me
/// PUT  /me           -> update_me
/// PUT  /me/password  -> change_password
/// GET  /dashboard    -> get_dashboard
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(profile::get_me).put(profile::update_me))
        .route("/me/password", put(profile::change_password))
        .route("/dashboard", get(student::get_dashboard))
}
