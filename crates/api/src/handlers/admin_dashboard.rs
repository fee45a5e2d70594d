//! Admin dashboard summary.

use acordeon_db::models::dashboard::{DashboardCounts, RecentComment, RecentEnrollment};
use acordeon_db::repositories::DashboardRepo;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireMaster;
use crate::response::DataResponse;
use crate::state::AppState;

/// Number of recent enrollments and comments shown.
const RECENT_LIMIT: i64 = 5;

#[derive(Debug, Serialize)]
pub struct AdminDashboard {
    #[serde(flatten)]
    pub counts: DashboardCounts,
    pub recent_enrollments: Vec<RecentEnrollment>,
    pub recent_comments: Vec<RecentComment>,
}

/// GET /api/v1/admin/dashboard
pub async fn get_dashboard(
    RequireMaster(_admin): RequireMaster,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<AdminDashboard>>> {
    let counts = DashboardRepo::counts(&state.pool).await?;
    let recent_enrollments = DashboardRepo::recent_enrollments(&state.pool, RECENT_LIMIT).await?;
    let recent_comments = DashboardRepo::recent_comments(&state.pool, RECENT_LIMIT).await?;

    Ok(Json(DataResponse {
        data: AdminDashboard {
            counts,
            recent_enrollments,
            recent_comments,
        },
    }))
}
