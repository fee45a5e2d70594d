//! Admin handlers for courses, modules, lessons and video uploads.
//!
//! All handlers require the `master` role.

use acordeon_bunny::CreatedVideo;
use acordeon_core::error::CoreError;
use acordeon_core::outline::next_order_index;
use acordeon_core::signing::{generate_upload_authorization, UploadAuthorization};
use acordeon_core::types::DbId;
use acordeon_core::validation::{
    normalize_video_title, thumbnail_storage_path, validate_course, validate_lesson,
    validate_module_title, validate_url,
};
use acordeon_db::models::course::{Course, CreateCourse};
use acordeon_db::models::course_module::{CourseModule, CreateCourseModule};
use acordeon_db::models::lesson::{CreateLesson, Lesson, UpdateLesson};
use acordeon_db::repositories::{CourseModuleRepo, CourseRepo, LessonRepo};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireMaster;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateCourseRequest {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub thumbnail_url: String,
    pub payment_link: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateModuleRequest {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateLessonRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub days_to_unlock: i32,
}

/// Partial lesson update. Omitted fields keep their stored values.
#[derive(Debug, Deserialize)]
pub struct UpdateLessonRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub days_to_unlock: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct SetLessonVideoRequest {
    pub video_id: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateVideoRequest {
    pub title: Option<String>,
}

/// A module with its lessons, for the course editor.
#[derive(Debug, Serialize)]
pub struct ModuleWithLessons {
    #[serde(flatten)]
    pub module: CourseModule,
    pub lessons: Vec<Lesson>,
}

#[derive(Debug, Serialize)]
pub struct CourseDetail {
    pub course: Course,
    pub modules: Vec<ModuleWithLessons>,
}

/// A new video entry plus the credentials for uploading its file.
#[derive(Debug, Serialize)]
pub struct VideoUpload {
    pub video: CreatedVideo,
    pub upload: UploadAuthorization,
}

// ---------------------------------------------------------------------------
// Courses
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/courses
pub async fn list_courses(
    RequireMaster(_admin): RequireMaster,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Course>>>> {
    let courses = CourseRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: courses }))
}

/// POST /api/v1/admin/courses
///
/// Courses start unpublished.
pub async fn create_course(
    RequireMaster(admin): RequireMaster,
    State(state): State<AppState>,
    Json(input): Json<CreateCourseRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Course>>)> {
    let title = input.title.trim();
    let slug = input.slug.trim();
    let description = input.description.trim();
    let thumbnail_url = input.thumbnail_url.trim();
    validate_course(title, slug, description, thumbnail_url)?;

    let payment_link = input
        .payment_link
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty());
    if let Some(link) = &payment_link {
        validate_url(link)?;
    }

    if CourseRepo::slug_exists(&state.pool, slug).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Ya existe un curso con ese slug".into(),
        )));
    }

    let course = CourseRepo::create(
        &state.pool,
        &CreateCourse {
            title: title.to_string(),
            slug: slug.to_string(),
            description: description.to_string(),
            thumbnail_url: thumbnail_url.to_string(),
            payment_link,
        },
    )
    .await?;

    tracing::info!(course_id = course.id, slug = %course.slug, user_id = admin.user_id, "Course created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: course })))
}

/// GET /api/v1/admin/courses/{id}
pub async fn get_course(
    RequireMaster(_admin): RequireMaster,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CourseDetail>>> {
    let course = find_course(&state, id).await?;
    let modules = CourseModuleRepo::list_by_course(&state.pool, id).await?;
    let lessons = LessonRepo::list_by_course(&state.pool, id).await?;

    let modules = modules
        .into_iter()
        .map(|module| ModuleWithLessons {
            lessons: lessons
                .iter()
                .filter(|l| l.module_id == module.id)
                .cloned()
                .collect(),
            module,
        })
        .collect();

    Ok(Json(DataResponse {
        data: CourseDetail { course, modules },
    }))
}

/// POST /api/v1/admin/courses/{id}/publish
pub async fn publish_course(
    RequireMaster(admin): RequireMaster,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Course>>> {
    let course = CourseRepo::publish(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "el curso",
            id,
        }))?;

    tracing::info!(course_id = id, user_id = admin.user_id, "Course published");
    Ok(Json(DataResponse { data: course }))
}

/// DELETE /api/v1/admin/courses/{id}
///
/// Removes the thumbnail first. Storage failures are logged and ignored.
pub async fn delete_course(
    RequireMaster(admin): RequireMaster,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let course = find_course(&state, id).await?;

    if let Some(path) = thumbnail_storage_path(&course.thumbnail_url) {
        if let Err(e) = state.thumbnails.remove(&path).await {
            tracing::warn!(course_id = id, path = %path, error = %e, "Failed to remove thumbnail");
        }
    }

    if !CourseRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "el curso",
            id,
        }));
    }

    tracing::info!(course_id = id, user_id = admin.user_id, "Course deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Modules and lessons
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/courses/{id}/modules
///
/// Appends the module after the course's last one.
pub async fn create_module(
    RequireMaster(_admin): RequireMaster,
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
    Json(input): Json<CreateModuleRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CourseModule>>)> {
    let title = validate_module_title(&input.title)?;
    find_course(&state, course_id).await?;

    let last = CourseModuleRepo::max_order_index(&state.pool, course_id).await?;
    let module = CourseModuleRepo::create(
        &state.pool,
        &CreateCourseModule {
            course_id,
            title,
            order_index: next_order_index(last)?,
        },
    )
    .await?;

    tracing::info!(course_id, module_id = module.id, "Module created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: module })))
}

/// POST /api/v1/admin/modules/{id}/lessons
///
/// Appends the lesson after the module's last one.
pub async fn create_lesson(
    RequireMaster(_admin): RequireMaster,
    State(state): State<AppState>,
    Path(module_id): Path<DbId>,
    Json(input): Json<CreateLessonRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Lesson>>)> {
    let fields = validate_lesson(&input.title, &input.description, input.days_to_unlock)?;

    CourseModuleRepo::find_by_id(&state.pool, module_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "el módulo",
            id: module_id,
        }))?;

    let last = LessonRepo::max_order_index(&state.pool, module_id).await?;
    let lesson = LessonRepo::create(
        &state.pool,
        &CreateLesson {
            module_id,
            title: fields.title,
            description: fields.description,
            days_to_unlock: fields.days_to_unlock,
            order_index: next_order_index(last)?,
        },
    )
    .await?;

    tracing::info!(module_id, lesson_id = lesson.id, "Lesson created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: lesson })))
}

/// PUT /api/v1/admin/lessons/{id}
pub async fn update_lesson(
    RequireMaster(_admin): RequireMaster,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLessonRequest>,
) -> AppResult<Json<DataResponse<Lesson>>> {
    let existing = LessonRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "la lección",
            id,
        }))?;

    // Validate the merged result so partial updates obey the same rules.
    let fields = validate_lesson(
        input.title.as_deref().unwrap_or(&existing.title),
        input.description.as_deref().unwrap_or(&existing.description),
        input.days_to_unlock.unwrap_or(existing.days_to_unlock),
    )?;

    let lesson = LessonRepo::update(
        &state.pool,
        id,
        &UpdateLesson {
            title: Some(fields.title),
            description: Some(fields.description),
            days_to_unlock: Some(fields.days_to_unlock),
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "la lección",
        id,
    }))?;

    Ok(Json(DataResponse { data: lesson }))
}

/// PUT /api/v1/admin/lessons/{id}/video
pub async fn set_lesson_video(
    RequireMaster(_admin): RequireMaster,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetLessonVideoRequest>,
) -> AppResult<Json<DataResponse<Lesson>>> {
    let video_id = input.video_id.trim();
    if video_id.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Falta el identificador del video".into(),
        )));
    }

    let lesson = LessonRepo::set_video(&state.pool, id, video_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "la lección",
            id,
        }))?;

    tracing::info!(lesson_id = id, video_id, "Lesson video attached");
    Ok(Json(DataResponse { data: lesson }))
}

// ---------------------------------------------------------------------------
// Videos
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/videos
///
/// Create an empty video entry on Bunny Stream and return the pre-signed
/// credentials the browser needs to upload the file directly. The API key
/// itself never leaves the server.
pub async fn create_video(
    RequireMaster(_admin): RequireMaster,
    State(state): State<AppState>,
    Json(input): Json<CreateVideoRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<VideoUpload>>)> {
    let bunny = &state.config.bunny;
    let title = normalize_video_title(input.title.as_deref());

    let (library_id, api_key) = bunny.signing.management_credentials()?;

    let video = state.bunny.create_video(library_id, api_key, &title).await?;
    let upload = generate_upload_authorization(
        &bunny.signing,
        &video.guid,
        bunny.upload_ttl_secs,
        Utc::now(),
    )?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: VideoUpload { video, upload },
        }),
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_course(state: &AppState, id: DbId) -> AppResult<Course> {
    CourseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "el curso",
            id,
        }))
}
