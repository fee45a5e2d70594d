//! Lesson completion progress model.

use acordeon_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `progress` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LessonProgress {
    pub id: DbId,
    pub user_id: DbId,
    pub lesson_id: DbId,
    pub is_completed: bool,
    pub completed_at: Option<Timestamp>,
}
