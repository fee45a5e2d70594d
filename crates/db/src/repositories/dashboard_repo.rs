//! Aggregate queries for the admin dashboard.

use acordeon_core::roles::ROLE_STUDENT;
use sqlx::PgPool;

use crate::models::dashboard::{DashboardCounts, RecentComment, RecentEnrollment};

pub struct DashboardRepo;

impl DashboardRepo {
    /// Students, published courses and total comments.
    pub async fn counts(pool: &PgPool) -> Result<DashboardCounts, sqlx::Error> {
        sqlx::query_as::<_, DashboardCounts>(
            "SELECT
                (SELECT COUNT(*) FROM profiles WHERE role = $1) AS total_students,
                (SELECT COUNT(*) FROM courses WHERE is_published = true) AS published_courses,
                (SELECT COUNT(*) FROM comments) AS total_comments",
        )
        .bind(ROLE_STUDENT)
        .fetch_one(pool)
        .await
    }

    /// Most recent enrollments, newest first.
    pub async fn recent_enrollments(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<RecentEnrollment>, sqlx::Error> {
        sqlx::query_as::<_, RecentEnrollment>(
            "SELECT e.user_id, e.course_id, e.created_at,
                    p.display_name AS student_display_name, c.title AS course_title
             FROM enrollments e
             JOIN profiles p ON p.id = e.user_id
             JOIN courses c ON c.id = e.course_id
             ORDER BY e.created_at DESC
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Most recent lesson comments, newest first.
    pub async fn recent_comments(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<RecentComment>, sqlx::Error> {
        sqlx::query_as::<_, RecentComment>(
            "SELECT cm.id, cm.content, cm.created_at,
                    p.display_name AS author_display_name,
                    l.id AS lesson_id, l.title AS lesson_title, c.slug AS course_slug
             FROM comments cm
             JOIN profiles p ON p.id = cm.user_id
             JOIN lessons l ON l.id = cm.lesson_id
             JOIN modules m ON m.id = l.module_id
             JOIN courses c ON c.id = m.course_id
             ORDER BY cm.created_at DESC
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
