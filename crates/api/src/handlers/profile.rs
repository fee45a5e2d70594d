//! Handlers for the caller's own profile (`/me`).

use acordeon_core::error::CoreError;
use acordeon_core::validation::{validate_new_password, validate_url};
use acordeon_db::models::profile::{ProfileResponse, UpdateProfile};
use acordeon_db::repositories::ProfileRepo;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /me`.
#[derive(Debug, Deserialize)]
pub struct UpdateMeRequest {
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Request body for `PUT /me/password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub new_password: String,
    pub confirm_password: String,
}

/// GET /api/v1/me
pub async fn get_me(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<ProfileResponse>>> {
    let profile = ProfileRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "el perfil",
            id: user.user_id,
        }))?;
    Ok(Json(DataResponse {
        data: ProfileResponse::from(&profile),
    }))
}

/// PUT /api/v1/me
///
/// A blank display name leaves the stored one untouched.
pub async fn update_me(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<UpdateMeRequest>,
) -> AppResult<Json<DataResponse<ProfileResponse>>> {
    let display_name = input
        .display_name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    let avatar_url = match input.avatar_url.map(|u| u.trim().to_string()) {
        Some(url) if !url.is_empty() => {
            validate_url(&url)?;
            Some(url)
        }
        _ => None,
    };

    let profile = ProfileRepo::update(
        &state.pool,
        user.user_id,
        &UpdateProfile {
            display_name,
            avatar_url,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "el perfil",
        id: user.user_id,
    }))?;

    tracing::info!(user_id = user.user_id, "Profile updated");
    Ok(Json(DataResponse {
        data: ProfileResponse::from(&profile),
    }))
}

/// PUT /api/v1/me/password
pub async fn change_password(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    let new_password = input.new_password.trim();
    validate_new_password(new_password, input.confirm_password.trim())?;

    let password_hash = hash_password(new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    if !ProfileRepo::update_password(&state.pool, user.user_id, &password_hash).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "el perfil",
            id: user.user_id,
        }));
    }

    tracing::info!(user_id = user.user_id, "Password changed");
    Ok(StatusCode::NO_CONTENT)
}
