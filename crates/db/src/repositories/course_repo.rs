//! Repository for the `courses` table.

use acordeon_core::types::DbId;
use sqlx::PgPool;

use crate::models::course::{Course, CourseTitle, CreateCourse};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, slug, description, thumbnail_url, payment_link, \
                        is_published, created_at, updated_at";

/// Provides CRUD operations for courses.
pub struct CourseRepo;

impl CourseRepo {
    /// Insert a new (unpublished) course, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCourse) -> Result<Course, sqlx::Error> {
        let query = format!(
            "INSERT INTO courses (title, slug, description, thumbnail_url, payment_link)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(&input.thumbnail_url)
            .bind(&input.payment_link)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE slug = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Whether any course already uses `slug`.
    pub async fn slug_exists(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM courses WHERE slug = $1)")
            .bind(slug)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// List every course, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses ORDER BY created_at DESC");
        sqlx::query_as::<_, Course>(&query).fetch_all(pool).await
    }

    /// List published courses, newest first.
    pub async fn list_published(pool: &PgPool) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM courses WHERE is_published = true ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Course>(&query).fetch_all(pool).await
    }

    /// Id and title of every course, alphabetically.
    pub async fn list_titles(pool: &PgPool) -> Result<Vec<CourseTitle>, sqlx::Error> {
        sqlx::query_as::<_, CourseTitle>("SELECT id, title FROM courses ORDER BY title")
            .fetch_all(pool)
            .await
    }

    /// Mark a course as published. Returns `None` if the course does not exist.
    pub async fn publish(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET is_published = true WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a course and, by cascade, its modules, lessons and enrollments.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
