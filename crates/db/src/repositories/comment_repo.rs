//! Repository for the `comments` table.

use acordeon_core::types::DbId;
use sqlx::PgPool;

use crate::models::comment::{Comment, CommentWithAuthor, CreateComment};

/// Lesson discussion threads.
pub struct CommentRepo;

impl CommentRepo {
    pub async fn create(pool: &PgPool, input: &CreateComment) -> Result<Comment, sqlx::Error> {
        sqlx::query_as::<_, Comment>(
            "INSERT INTO comments (user_id, lesson_id, content)
             VALUES ($1, $2, $3)
             RETURNING id, user_id, lesson_id, content, created_at",
        )
        .bind(input.user_id)
        .bind(input.lesson_id)
        .bind(&input.content)
        .fetch_one(pool)
        .await
    }

    /// Comments on a lesson, oldest first, with author names.
    pub async fn list_by_lesson(
        pool: &PgPool,
        lesson_id: DbId,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, CommentWithAuthor>(
            "SELECT c.id, c.user_id, c.content, c.created_at,
                    p.display_name AS author_display_name
             FROM comments c
             LEFT JOIN profiles p ON p.id = c.user_id
             WHERE c.lesson_id = $1
             ORDER BY c.created_at ASC, c.id ASC",
        )
        .bind(lesson_id)
        .fetch_all(pool)
        .await
    }
}
