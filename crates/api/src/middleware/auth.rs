//! JWT-based authentication extractors for Axum handlers.

use acordeon_core::error::CoreError;
use acordeon_core::types::DbId;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::auth::jwt::{validate_token, Claims, JwtConfig};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated profile extracted from the `Authorization: Bearer` header.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    /// `"master"` or `"student"`.
    pub role: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            role: claims.role,
        }
    }
}

/// Decode the bearer token in `parts`, if any.
fn authenticate(parts: &Parts, jwt: &JwtConfig) -> Result<AuthUser, AppError> {
    let auth_header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Debes iniciar sesión".into())))?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized(
            "Formato de autorización inválido. Se espera: Bearer <token>".into(),
        ))
    })?;

    let claims = validate_token(token, jwt).map_err(|_| {
        AppError::Core(CoreError::Unauthorized("Sesión inválida o expirada".into()))
    })?;

    Ok(claims.into())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(parts, &state.config.jwt)
    }
}

/// Optional authentication for public routes.
///
/// A missing, malformed, or expired token yields `MaybeAuthUser(None)`
/// instead of a rejection.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthUser(authenticate(parts, &state.config.jwt).ok()))
    }
}
