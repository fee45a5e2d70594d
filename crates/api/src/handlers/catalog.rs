//! Public course catalog.

use acordeon_core::types::DbId;
use acordeon_db::models::app_setting::WHATSAPP_SUPPORT_NUMBER;
use acordeon_db::models::course::Course;
use acordeon_db::models::marketing_video::MarketingVideo;
use acordeon_db::repositories::{
    AppSettingRepo, CourseRepo, EnrollmentRepo, MarketingVideoRepo,
};
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::MaybeAuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Landing page payload.
#[derive(Debug, Serialize)]
pub struct Catalog {
    pub courses: Vec<Course>,
    pub marketing_videos: Vec<MarketingVideo>,
    /// `None` when the setting is unset or blank.
    pub whatsapp_support_number: Option<String>,
    /// Courses the caller already owns. Empty for anonymous visitors.
    pub enrolled_course_ids: Vec<DbId>,
}

/// GET /api/v1/catalog
pub async fn get_catalog(
    MaybeAuthUser(user): MaybeAuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Catalog>>> {
    let courses = CourseRepo::list_published(&state.pool).await?;
    let marketing_videos = MarketingVideoRepo::list_active(&state.pool).await?;
    let whatsapp_support_number = AppSettingRepo::get_value(&state.pool, WHATSAPP_SUPPORT_NUMBER)
        .await?
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let enrolled_course_ids = match user {
        Some(user) => EnrollmentRepo::list_course_ids_for_user(&state.pool, user.user_id).await?,
        None => Vec::new(),
    };

    Ok(Json(DataResponse {
        data: Catalog {
            courses,
            marketing_videos,
            whatsapp_support_number,
            enrolled_course_ids,
        },
    }))
}
