//! Student course pages: outline, lesson view, comments, completion.
//!
//! Every route here requires an enrollment in the course named by the slug.
//! The enrollment's `created_at` anchors the drip schedule.

use std::collections::HashSet;

use acordeon_core::drip::{is_unlocked, LessonAccess};
use acordeon_core::error::CoreError;
use acordeon_core::outline::{neighbours, order_lessons, OrderedLesson};
use acordeon_core::progress::ProgressSummary;
use acordeon_core::signing::{generate_playback_token, PlaybackToken};
use acordeon_core::types::DbId;
use acordeon_core::validation::validate_comment;
use acordeon_db::models::comment::{Comment, CommentWithAuthor, CreateComment};
use acordeon_db::models::course::Course;
use acordeon_db::models::enrollment::Enrollment;
use acordeon_db::models::lesson::{LessonWithModule, OutlineLessonRow};
use acordeon_db::repositories::{
    CommentRepo, CourseModuleRepo, CourseRepo, EnrollmentRepo, LessonRepo, ProgressRepo,
};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// Where the client goes after finishing the last lesson.
const DASHBOARD_PATH: &str = "/dashboard";

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct CourseRef {
    pub id: DbId,
    pub title: String,
    pub slug: String,
}

impl From<&Course> for CourseRef {
    fn from(c: &Course) -> Self {
        Self {
            id: c.id,
            title: c.title.clone(),
            slug: c.slug.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OutlineLesson {
    pub id: DbId,
    pub title: String,
    pub order_index: i32,
    pub days_to_unlock: i32,
    pub is_locked: bool,
    pub is_completed: bool,
}

#[derive(Debug, Serialize)]
pub struct OutlineModule {
    pub id: DbId,
    pub title: String,
    pub order_index: i32,
    pub lessons: Vec<OutlineLesson>,
}

/// Sidebar data for an enrolled course.
#[derive(Debug, Serialize)]
pub struct CourseOutline {
    pub course: CourseRef,
    pub modules: Vec<OutlineModule>,
    pub completed_lesson_ids: Vec<DbId>,
    pub locked_lesson_ids: Vec<DbId>,
    pub total_lessons: usize,
    pub progress: ProgressSummary,
    pub first_lesson_id: Option<DbId>,
}

#[derive(Debug, Serialize)]
pub struct LessonLink {
    pub id: DbId,
    pub title: String,
}

impl From<&OrderedLesson> for LessonLink {
    fn from(l: &OrderedLesson) -> Self {
        Self {
            id: l.id,
            title: l.title.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LessonDetail {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub module_id: DbId,
    pub module_title: String,
    pub has_video: bool,
}

/// A single lesson page.
///
/// `video` is only present for unlocked lessons with a video. When signing
/// is not configured, `video_error` carries a message instead.
#[derive(Debug, Serialize)]
pub struct LessonView {
    pub course: CourseRef,
    pub lesson: LessonDetail,
    pub access: LessonAccess,
    /// Countdown text, present while the lesson is locked.
    pub remaining_label: Option<String>,
    pub position: usize,
    pub total: usize,
    pub previous: Option<LessonLink>,
    pub next: Option<LessonLink>,
    pub is_completed: bool,
    pub video: Option<PlaybackToken>,
    pub video_error: Option<String>,
    pub comments: Vec<CommentWithAuthor>,
}

/// Request body for `POST .../comments`.
#[derive(Debug, Deserialize)]
pub struct PostCommentRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct CompletionResponse {
    /// Next lesson page, or the dashboard after the last lesson.
    pub redirect_to: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/courses/{slug}
pub async fn get_outline(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<CourseOutline>>> {
    let (course, enrollment) = enrolled_course(&state, user.user_id, &slug).await?;
    let now = Utc::now();

    let modules = CourseModuleRepo::list_by_course(&state.pool, course.id).await?;
    let lessons = LessonRepo::list_outline_by_course(&state.pool, course.id).await?;
    let completed = completed_ids(&state, user.user_id).await?;

    let lesson_ids: Vec<DbId> = lessons.iter().map(|l| l.id).collect();
    let completed_lesson_ids: Vec<DbId> = lesson_ids
        .iter()
        .copied()
        .filter(|id| completed.contains(id))
        .collect();
    let locked_lesson_ids: Vec<DbId> = lessons
        .iter()
        .filter(|l| !is_unlocked(enrollment.created_at, l.days_to_unlock, now))
        .map(|l| l.id)
        .collect();

    let ordered = ordered_lessons(&lessons);

    let outline_modules = modules
        .into_iter()
        .map(|m| OutlineModule {
            lessons: lessons
                .iter()
                .filter(|l| l.module_id == m.id)
                .map(|l| OutlineLesson {
                    id: l.id,
                    title: l.title.clone(),
                    order_index: l.order_index,
                    days_to_unlock: l.days_to_unlock,
                    is_locked: locked_lesson_ids.contains(&l.id),
                    is_completed: completed.contains(&l.id),
                })
                .collect(),
            id: m.id,
            title: m.title,
            order_index: m.order_index,
        })
        .collect();

    Ok(Json(DataResponse {
        data: CourseOutline {
            course: CourseRef::from(&course),
            modules: outline_modules,
            progress: ProgressSummary::from_ids(&lesson_ids, &completed),
            total_lessons: lesson_ids.len(),
            first_lesson_id: ordered.first().map(|l| l.id),
            completed_lesson_ids,
            locked_lesson_ids,
        },
    }))
}

/// GET /api/v1/courses/{slug}/lessons/{lesson_id}
///
/// No playback token is generated for a locked lesson.
pub async fn get_lesson(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path((slug, lesson_id)): Path<(String, DbId)>,
) -> AppResult<Json<DataResponse<LessonView>>> {
    let (course, enrollment) = enrolled_course(&state, user.user_id, &slug).await?;
    let lesson = course_lesson(&state, &course, lesson_id).await?;
    let now = Utc::now();

    let access = LessonAccess::evaluate(enrollment.created_at, lesson.days_to_unlock, now);

    let outline = LessonRepo::list_outline_by_course(&state.pool, course.id).await?;
    let ordered = ordered_lessons(&outline);
    let nav = neighbours(&ordered, lesson.id).ok_or_else(|| {
        AppError::InternalError(format!("lesson {} missing from its course outline", lesson.id))
    })?;

    let (video, video_error) = match (&lesson.video_provider_id, access.is_unlocked) {
        (Some(video_id), true) => {
            let bunny = &state.config.bunny;
            match generate_playback_token(&bunny.signing, video_id, bunny.playback_ttl_secs, now) {
                Ok(token) => (Some(token), None),
                Err(e) => {
                    tracing::warn!(lesson_id = lesson.id, error = %e, "Cannot sign playback URL");
                    (None, Some(format!("Video no disponible: {e}")))
                }
            }
        }
        _ => (None, None),
    };

    let completed = completed_ids(&state, user.user_id).await?;
    let comments = CommentRepo::list_by_lesson(&state.pool, lesson.id).await?;

    let view = LessonView {
        course: CourseRef::from(&course),
        remaining_label: (!access.is_unlocked).then(|| access.remaining_label()),
        access,
        position: nav.position,
        total: nav.total,
        previous: nav.previous.map(LessonLink::from),
        next: nav.next.map(LessonLink::from),
        is_completed: completed.contains(&lesson.id),
        video,
        video_error,
        comments,
        lesson: LessonDetail {
            has_video: lesson.video_provider_id.is_some(),
            id: lesson.id,
            title: lesson.title,
            description: lesson.description,
            module_id: lesson.module_id,
            module_title: lesson.module_title,
        },
    };

    Ok(Json(DataResponse { data: view }))
}

/// POST /api/v1/courses/{slug}/lessons/{lesson_id}/comments
pub async fn post_comment(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path((slug, lesson_id)): Path<(String, DbId)>,
    Json(input): Json<PostCommentRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Comment>>)> {
    let content = validate_comment(&input.content)?;
    let (course, _) = enrolled_course(&state, user.user_id, &slug).await?;
    let lesson = course_lesson(&state, &course, lesson_id).await?;

    let comment = CommentRepo::create(
        &state.pool,
        &CreateComment {
            user_id: user.user_id,
            lesson_id: lesson.id,
            content,
        },
    )
    .await?;

    tracing::info!(user_id = user.user_id, lesson_id, comment_id = comment.id, "Comment posted");
    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

/// POST /api/v1/courses/{slug}/lessons/{lesson_id}/complete
///
/// Marks the lesson completed (idempotent) and tells the client where to go
/// next.
pub async fn complete_lesson(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path((slug, lesson_id)): Path<(String, DbId)>,
) -> AppResult<Json<CompletionResponse>> {
    let (course, enrollment) = enrolled_course(&state, user.user_id, &slug).await?;
    let lesson = course_lesson(&state, &course, lesson_id).await?;

    if !is_unlocked(enrollment.created_at, lesson.days_to_unlock, Utc::now()) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Esta lección aún no está disponible".into(),
        )));
    }

    ProgressRepo::mark_completed(&state.pool, user.user_id, lesson.id).await?;

    let outline = LessonRepo::list_outline_by_course(&state.pool, course.id).await?;
    let ordered = ordered_lessons(&outline);
    let redirect_to = match neighbours(&ordered, lesson.id).and_then(|n| n.next) {
        Some(next) => format!("/course/{}/lesson/{}", course.slug, next.id),
        None => DASHBOARD_PATH.to_string(),
    };

    tracing::info!(user_id = user.user_id, lesson_id, "Lesson completed");
    Ok(Json(CompletionResponse { redirect_to }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve the course by slug and the caller's enrollment in it.
async fn enrolled_course(
    state: &AppState,
    user_id: DbId,
    slug: &str,
) -> AppResult<(Course, Enrollment)> {
    let course = CourseRepo::find_by_slug(&state.pool, slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Curso no encontrado".into()))?;

    let enrollment = EnrollmentRepo::find(&state.pool, user_id, course.id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Forbidden("No tienes acceso a este curso".into()))
        })?;

    Ok((course, enrollment))
}

/// Load a lesson, requiring it to belong to `course`.
async fn course_lesson(
    state: &AppState,
    course: &Course,
    lesson_id: DbId,
) -> AppResult<LessonWithModule> {
    match LessonRepo::find_with_module(&state.pool, lesson_id).await? {
        Some(lesson) if lesson.course_id == course.id => Ok(lesson),
        Some(_) => Err(AppError::NotFound(
            "Esta lección no pertenece al curso".into(),
        )),
        None => Err(AppError::Core(CoreError::NotFound {
            entity: "la lección",
            id: lesson_id,
        })),
    }
}

async fn completed_ids(state: &AppState, user_id: DbId) -> AppResult<HashSet<DbId>> {
    Ok(ProgressRepo::list_completed_lesson_ids(&state.pool, user_id)
        .await?
        .into_iter()
        .collect())
}

fn ordered_lessons(rows: &[OutlineLessonRow]) -> Vec<OrderedLesson> {
    let mut ordered: Vec<OrderedLesson> = rows.iter().map(OrderedLesson::from).collect();
    order_lessons(&mut ordered);
    ordered
}
