//! Course module entity model and DTOs.

use acordeon_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `modules` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseModule {
    pub id: DbId,
    pub course_id: DbId,
    pub title: String,
    pub order_index: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for appending a module to a course.
pub struct CreateCourseModule {
    pub course_id: DbId,
    pub title: String,
    pub order_index: i32,
}
