//! Repository for the `lessons` table.

use acordeon_core::types::DbId;
use sqlx::PgPool;

use crate::models::lesson::{CreateLesson, Lesson, LessonWithModule, OutlineLessonRow, UpdateLesson};

const COLUMNS: &str = "id, module_id, title, description, video_provider_id, days_to_unlock, \
                        order_index, created_at, updated_at";

/// Provides CRUD operations for lessons.
pub struct LessonRepo;

impl LessonRepo {
    pub async fn create(pool: &PgPool, input: &CreateLesson) -> Result<Lesson, sqlx::Error> {
        let query = format!(
            "INSERT INTO lessons (module_id, title, description, days_to_unlock, order_index)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lesson>(&query)
            .bind(input.module_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.days_to_unlock)
            .bind(input.order_index)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Lesson>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lessons WHERE id = $1");
        sqlx::query_as::<_, Lesson>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch a lesson together with its module and owning course id.
    pub async fn find_with_module(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<LessonWithModule>, sqlx::Error> {
        sqlx::query_as::<_, LessonWithModule>(
            "SELECT l.id, l.module_id, l.title, l.description, l.video_provider_id,
                    l.days_to_unlock, l.order_index,
                    m.title AS module_title, m.order_index AS module_order_index,
                    m.course_id
             FROM lessons l
             JOIN modules m ON m.id = l.module_id
             WHERE l.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// All lessons of a course, already in course order.
    pub async fn list_outline_by_course(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<OutlineLessonRow>, sqlx::Error> {
        sqlx::query_as::<_, OutlineLessonRow>(
            "SELECT l.id, l.module_id, l.title, l.order_index, l.days_to_unlock,
                    m.order_index AS module_order_index
             FROM lessons l
             JOIN modules m ON m.id = l.module_id
             WHERE m.course_id = $1
             ORDER BY m.order_index, l.order_index, l.id",
        )
        .bind(course_id)
        .fetch_all(pool)
        .await
    }

    /// Full lesson rows of a course, for the admin course editor.
    pub async fn list_by_course(pool: &PgPool, course_id: DbId) -> Result<Vec<Lesson>, sqlx::Error> {
        sqlx::query_as::<_, Lesson>(
            "SELECT l.id, l.module_id, l.title, l.description, l.video_provider_id,
                    l.days_to_unlock, l.order_index, l.created_at, l.updated_at
             FROM lessons l
             JOIN modules m ON m.id = l.module_id
             WHERE m.course_id = $1
             ORDER BY m.order_index, l.order_index, l.id",
        )
        .bind(course_id)
        .fetch_all(pool)
        .await
    }

    /// `(course_id, lesson_id)` for every lesson in the given courses.
    pub async fn list_ids_for_courses(
        pool: &PgPool,
        course_ids: &[DbId],
    ) -> Result<Vec<(DbId, DbId)>, sqlx::Error> {
        sqlx::query_as(
            "SELECT m.course_id, l.id
             FROM lessons l
             JOIN modules m ON m.id = l.module_id
             WHERE m.course_id = ANY($1)",
        )
        .bind(course_ids)
        .fetch_all(pool)
        .await
    }

    /// Highest `order_index` within a module, if it has any lessons.
    pub async fn max_order_index(pool: &PgPool, module_id: DbId) -> Result<Option<i32>, sqlx::Error> {
        let row: (Option<i32>,) =
            sqlx::query_as("SELECT MAX(order_index) FROM lessons WHERE module_id = $1")
                .bind(module_id)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }

    /// Update lesson fields. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLesson,
    ) -> Result<Option<Lesson>, sqlx::Error> {
        let query = format!(
            "UPDATE lessons SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                days_to_unlock = COALESCE($4, days_to_unlock)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lesson>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.days_to_unlock)
            .fetch_optional(pool)
            .await
    }

    /// Attach a Bunny Stream video to a lesson.
    pub async fn set_video(
        pool: &PgPool,
        id: DbId,
        video_provider_id: &str,
    ) -> Result<Option<Lesson>, sqlx::Error> {
        let query = format!(
            "UPDATE lessons SET video_provider_id = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lesson>(&query)
            .bind(id)
            .bind(video_provider_id)
            .fetch_optional(pool)
            .await
    }
}
