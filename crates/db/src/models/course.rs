//! Course entity model and DTOs.

use acordeon_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `courses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub thumbnail_url: String,
    pub payment_link: Option<String>,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new course. Courses start unpublished.
#[derive(Debug, Deserialize)]
pub struct CreateCourse {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub thumbnail_url: String,
    pub payment_link: Option<String>,
}

/// Id/title pair used by the admin student-access matrix.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseTitle {
    pub id: DbId,
    pub title: String,
}
