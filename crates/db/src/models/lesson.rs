//! Lesson entity model and DTOs.

use acordeon_core::outline::OrderedLesson;
use acordeon_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `lessons` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lesson {
    pub id: DbId,
    pub module_id: DbId,
    pub title: String,
    pub description: String,
    /// Bunny Stream video GUID, set once an upload has been attached.
    pub video_provider_id: Option<String>,
    pub days_to_unlock: i32,
    pub order_index: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A lesson joined with the module it belongs to.
#[derive(Debug, Clone, FromRow)]
pub struct LessonWithModule {
    pub id: DbId,
    pub module_id: DbId,
    pub title: String,
    pub description: String,
    pub video_provider_id: Option<String>,
    pub days_to_unlock: i32,
    pub order_index: i32,
    pub module_title: String,
    pub module_order_index: i32,
    pub course_id: DbId,
}

/// Lesson columns needed for a course outline, with module ordering.
#[derive(Debug, Clone, FromRow)]
pub struct OutlineLessonRow {
    pub id: DbId,
    pub module_id: DbId,
    pub title: String,
    pub order_index: i32,
    pub days_to_unlock: i32,
    pub module_order_index: i32,
}

impl From<&OutlineLessonRow> for OrderedLesson {
    fn from(row: &OutlineLessonRow) -> Self {
        OrderedLesson {
            id: row.id,
            title: row.title.clone(),
            module_order_index: row.module_order_index,
            order_index: row.order_index,
        }
    }
}

/// DTO for appending a lesson to a module.
pub struct CreateLesson {
    pub module_id: DbId,
    pub title: String,
    pub description: String,
    pub days_to_unlock: i32,
    pub order_index: i32,
}

/// DTO for editing a lesson. `None` fields are left unchanged.
#[derive(Debug, Default)]
pub struct UpdateLesson {
    pub title: Option<String>,
    pub description: Option<String>,
    pub days_to_unlock: Option<i32>,
}
