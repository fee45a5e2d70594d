//! Admin student list and course access management.

use std::collections::HashMap;

use acordeon_core::error::CoreError;
use acordeon_core::roles::ROLE_STUDENT;
use acordeon_core::types::{DbId, Timestamp};
use acordeon_db::models::course::CourseTitle;
use acordeon_db::repositories::{CourseRepo, EnrollmentRepo, ProfileRepo};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::error::{unique_violation, AppError, AppResult};
use crate::middleware::rbac::RequireMaster;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StudentRow {
    pub id: DbId,
    pub display_name: Option<String>,
    pub email: String,
    pub created_at: Timestamp,
    pub enrolled_course_ids: Vec<DbId>,
}

/// Students plus every course, so the client can render an access matrix.
#[derive(Debug, Serialize)]
pub struct StudentDirectory {
    pub students: Vec<StudentRow>,
    pub courses: Vec<CourseTitle>,
}

/// GET /api/v1/admin/students
pub async fn list_students(
    RequireMaster(_admin): RequireMaster,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<StudentDirectory>>> {
    let profiles = ProfileRepo::list_students(&state.pool).await?;
    let user_ids: Vec<DbId> = profiles.iter().map(|p| p.id).collect();

    let mut by_user: HashMap<DbId, Vec<DbId>> = HashMap::new();
    if !user_ids.is_empty() {
        for pair in EnrollmentRepo::list_pairs_for_users(&state.pool, &user_ids).await? {
            by_user.entry(pair.user_id).or_default().push(pair.course_id);
        }
    }

    let students = profiles
        .into_iter()
        .map(|p| StudentRow {
            enrolled_course_ids: by_user.remove(&p.id).unwrap_or_default(),
            id: p.id,
            display_name: p.display_name,
            email: p.email,
            created_at: p.created_at,
        })
        .collect();

    let courses = CourseRepo::list_titles(&state.pool).await?;

    Ok(Json(DataResponse {
        data: StudentDirectory { students, courses },
    }))
}

/// PUT /api/v1/admin/students/{user_id}/enrollments/{course_id}
///
/// Grant access. Granting an existing enrollment succeeds without changing
/// its `created_at`, so the drip schedule is not reset.
pub async fn grant_access(
    RequireMaster(admin): RequireMaster,
    State(state): State<AppState>,
    Path((user_id, course_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let student = ProfileRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "el perfil",
            id: user_id,
        }))?;
    if student.role != ROLE_STUDENT {
        return Err(AppError::Core(CoreError::Validation(
            "Solo se puede dar acceso a estudiantes".into(),
        )));
    }
    CourseRepo::find_by_id(&state.pool, course_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "el curso",
            id: course_id,
        }))?;

    match EnrollmentRepo::create(&state.pool, user_id, course_id).await {
        Ok(_) => {
            tracing::info!(user_id, course_id, admin_id = admin.user_id, "Access granted");
        }
        Err(e) if unique_violation(&e).is_some() => {
            tracing::debug!(user_id, course_id, "Access already granted");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/admin/students/{user_id}/enrollments/{course_id}
///
/// Revoke access. Revoking a missing enrollment is a no-op.
pub async fn revoke_access(
    RequireMaster(admin): RequireMaster,
    State(state): State<AppState>,
    Path((user_id, course_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let removed = EnrollmentRepo::delete(&state.pool, user_id, course_id).await?;
    tracing::info!(user_id, course_id, removed, admin_id = admin.user_id, "Access revoked");
    Ok(StatusCode::NO_CONTENT)
}
