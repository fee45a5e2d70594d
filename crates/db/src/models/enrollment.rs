//! Enrollment entity model.

use acordeon_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `enrollments` table.
///
/// `created_at` anchors drip-content unlock dates for the course.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Enrollment {
    pub id: DbId,
    pub user_id: DbId,
    pub course_id: DbId,
    pub created_at: Timestamp,
}

/// An enrollment joined with its course, for the student dashboard.
#[derive(Debug, Clone, FromRow)]
pub struct EnrolledCourse {
    pub course_id: DbId,
    pub enrolled_at: Timestamp,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub thumbnail_url: String,
}

/// `(user, course)` pair for the admin access matrix.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct EnrollmentPair {
    pub user_id: DbId,
    pub course_id: DbId,
}
