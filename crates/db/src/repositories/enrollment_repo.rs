//! Repository for the `enrollments` table.

use acordeon_core::types::DbId;
use sqlx::PgPool;

use crate::models::enrollment::{EnrolledCourse, Enrollment, EnrollmentPair};

const COLUMNS: &str = "id, user_id, course_id, created_at";

/// Grants and revokes course access.
pub struct EnrollmentRepo;

impl EnrollmentRepo {
    /// Grant access. Fails with a unique violation if it already exists.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        course_id: DbId,
    ) -> Result<Enrollment, sqlx::Error> {
        let query = format!(
            "INSERT INTO enrollments (user_id, course_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(user_id)
            .bind(course_id)
            .fetch_one(pool)
            .await
    }

    /// Revoke access. Returns `true` if an enrollment was removed.
    pub async fn delete(pool: &PgPool, user_id: DbId, course_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM enrollments WHERE user_id = $1 AND course_id = $2")
            .bind(user_id)
            .bind(course_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn find(
        pool: &PgPool,
        user_id: DbId,
        course_id: DbId,
    ) -> Result<Option<Enrollment>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM enrollments WHERE user_id = $1 AND course_id = $2");
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(user_id)
            .bind(course_id)
            .fetch_optional(pool)
            .await
    }

    /// Course ids the user is enrolled in.
    pub async fn list_course_ids_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT course_id FROM enrollments WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// The user's enrollments joined with their courses, newest first.
    pub async fn list_courses_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<EnrolledCourse>, sqlx::Error> {
        sqlx::query_as::<_, EnrolledCourse>(
            "SELECT c.id AS course_id, e.created_at AS enrolled_at, c.title, c.slug,
                    c.description, c.thumbnail_url
             FROM enrollments e
             JOIN courses c ON c.id = e.course_id
             WHERE e.user_id = $1
             ORDER BY e.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Every `(user, course)` pair for the given users.
    pub async fn list_pairs_for_users(
        pool: &PgPool,
        user_ids: &[DbId],
    ) -> Result<Vec<EnrollmentPair>, sqlx::Error> {
        sqlx::query_as::<_, EnrollmentPair>(
            "SELECT user_id, course_id FROM enrollments WHERE user_id = ANY($1)",
        )
        .bind(user_ids)
        .fetch_all(pool)
        .await
    }
}
