//! Handlers for the `/auth` resource (register, login, refresh, logout).

use acordeon_core::error::CoreError;
use acordeon_core::roles::{landing_path, ROLE_STUDENT};
use acordeon_core::types::DbId;
use acordeon_core::validation::{validate_registration, Registration};
use acordeon_db::models::profile::{CreateProfile, Profile};
use acordeon_db::models::session::CreateSession;
use acordeon_db::repositories::{ProfileRepo, SessionRepo};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub display_name: String,
    pub phone: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by register, login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
    /// Where the client should navigate next, based on the role.
    pub redirect_to: &'static str,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub email: String,
    pub role: String,
    pub display_name: Option<String>,
}

impl From<&Profile> for UserInfo {
    fn from(p: &Profile) -> Self {
        Self {
            id: p.id,
            email: p.email.clone(),
            role: p.role.clone(),
            display_name: p.display_name.clone(),
        }
    }
}

const INVALID_CREDENTIALS: &str = "Correo o contraseña incorrectos";

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create a `student` profile and sign it in.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    validate_registration(&Registration {
        email: &input.email,
        password: &input.password,
        confirm_password: &input.confirm_password,
        display_name: &input.display_name,
        phone: &input.phone,
    })?;

    let email = input.email.trim().to_lowercase();
    if ProfileRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Ya existe una cuenta con este correo".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let profile = ProfileRepo::create(
        &state.pool,
        &CreateProfile {
            email,
            password_hash,
            role: ROLE_STUDENT.to_string(),
            display_name: Some(input.display_name.trim().to_string()),
            phone: Some(input.phone.trim().to_string()),
        },
    )
    .await?;

    tracing::info!(user_id = profile.id, "Student registered");

    let response = create_auth_response(&state, &profile).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    if input.email.trim().is_empty() || input.password.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Correo y contraseña son obligatorios".into(),
        )));
    }

    let profile = ProfileRepo::find_by_email(&state.pool, input.email.trim())
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    if !profile.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "La cuenta está desactivada".into(),
        )));
    }

    let password_valid = verify_password(&input.password, &profile.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = profile.id, "Failed login attempt");
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    let response = create_auth_response(&state, &profile).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for a new token pair. The old session is
/// revoked.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    let session = SessionRepo::find_by_refresh_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Sesión inválida o expirada".into()))
        })?;

    // A concurrent refresh of the same token may have won the race.
    if !SessionRepo::revoke(&state.pool, session.id).await? {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Sesión inválida o expirada".into(),
        )));
    }

    let profile = ProfileRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("La cuenta ya no existe".into())))?;

    if !profile.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "La cuenta está desactivada".into(),
        )));
    }

    let response = create_auth_response(&state, &profile).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the caller. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    tracing::debug!(user_id = auth_user.user_id, revoked, "Logged out");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Issue a token pair, persist the refresh session, and build the response.
async fn create_auth_response(state: &AppState, profile: &Profile) -> AppResult<AuthResponse> {
    let jwt = &state.config.jwt;

    let access_token = generate_access_token(profile.id, &profile.role, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();
    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: profile.id,
            refresh_token_hash: refresh_hash,
            expires_at: Utc::now() + chrono::Duration::days(jwt.refresh_token_expiry_days),
        },
    )
    .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in: jwt.access_token_expiry_mins * 60,
        user: UserInfo::from(profile),
        redirect_to: landing_path(&profile.role),
    })
}
