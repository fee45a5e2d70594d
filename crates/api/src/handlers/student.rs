//! Student dashboard.

use std::collections::{HashMap, HashSet};

use acordeon_core::progress::ProgressSummary;
use acordeon_core::types::{DbId, Timestamp};
use acordeon_db::repositories::{EnrollmentRepo, LessonRepo, ProgressRepo};
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// One enrolled course with the caller's progress through it.
#[derive(Debug, Serialize)]
pub struct DashboardCourse {
    pub course_id: DbId,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub thumbnail_url: String,
    pub enrolled_at: Timestamp,
    pub progress: ProgressSummary,
}

/// GET /api/v1/dashboard
///
/// Enrolled courses, newest enrollment first.
pub async fn get_dashboard(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<DashboardCourse>>>> {
    let enrolled = EnrollmentRepo::list_courses_for_user(&state.pool, user.user_id).await?;
    let course_ids: Vec<DbId> = enrolled.iter().map(|c| c.course_id).collect();

    let mut lessons_by_course: HashMap<DbId, Vec<DbId>> = HashMap::new();
    for (course_id, lesson_id) in LessonRepo::list_ids_for_courses(&state.pool, &course_ids).await? {
        lessons_by_course.entry(course_id).or_default().push(lesson_id);
    }

    let completed: HashSet<DbId> = ProgressRepo::list_completed_lesson_ids(&state.pool, user.user_id)
        .await?
        .into_iter()
        .collect();

    let courses = enrolled
        .into_iter()
        .map(|c| {
            let lesson_ids = lessons_by_course.get(&c.course_id).map_or(&[][..], Vec::as_slice);
            DashboardCourse {
                progress: ProgressSummary::from_ids(lesson_ids, &completed),
                course_id: c.course_id,
                title: c.title,
                slug: c.slug,
                description: c.description,
                thumbnail_url: c.thumbnail_url,
                enrolled_at: c.enrolled_at,
            }
        })
        .collect();

    Ok(Json(DataResponse { data: courses }))
}
