//! Read-only aggregates for the admin dashboard.

use acordeon_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Headline counters.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DashboardCounts {
    pub total_students: i64,
    pub published_courses: i64,
    pub total_comments: i64,
}

/// A recent enrollment with student and course names.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecentEnrollment {
    pub user_id: DbId,
    pub course_id: DbId,
    pub created_at: Timestamp,
    pub student_display_name: Option<String>,
    pub course_title: String,
}

/// A recent comment with author, lesson and course context.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecentComment {
    pub id: DbId,
    pub content: String,
    pub created_at: Timestamp,
    pub author_display_name: Option<String>,
    pub lesson_id: DbId,
    pub lesson_title: String,
    pub course_slug: String,
}
