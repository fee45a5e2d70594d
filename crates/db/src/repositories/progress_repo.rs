//! Repository for the `progress` table.

use acordeon_core::types::DbId;
use sqlx::PgPool;

use crate::models::progress::LessonProgress;

/// Tracks lesson completion per user.
pub struct ProgressRepo;

impl ProgressRepo {
    /// Mark a lesson completed for a user, creating or updating the row.
    pub async fn mark_completed(
        pool: &PgPool,
        user_id: DbId,
        lesson_id: DbId,
    ) -> Result<LessonProgress, sqlx::Error> {
        sqlx::query_as::<_, LessonProgress>(
            "INSERT INTO progress (user_id, lesson_id, is_completed, completed_at)
             VALUES ($1, $2, true, NOW())
             ON CONFLICT ON CONSTRAINT uq_progress_user_lesson
             DO UPDATE SET is_completed = true, completed_at = NOW()
             RETURNING id, user_id, lesson_id, is_completed, completed_at",
        )
        .bind(user_id)
        .bind(lesson_id)
        .fetch_one(pool)
        .await
    }

    /// Ids of every lesson the user has completed, across all courses.
    pub async fn list_completed_lesson_ids(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT lesson_id FROM progress WHERE user_id = $1 AND is_completed = true",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
