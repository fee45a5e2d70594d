//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! meet the requirement.

use acordeon_core::error::CoreError;
use acordeon_core::roles::ROLE_MASTER;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `master` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireMaster(user): RequireMaster) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireMaster(pub AuthUser);

impl FromRequestParts<AppState> for RequireMaster {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_MASTER {
            return Err(AppError::Core(CoreError::Forbidden(
                "Solo el administrador (master) puede realizar esta acción".into(),
            )));
        }
        Ok(RequireMaster(user))
    }
}

/// Requires any authenticated profile.
///
/// Equivalent to [`AuthUser`] but self-documenting in handler signatures.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}
