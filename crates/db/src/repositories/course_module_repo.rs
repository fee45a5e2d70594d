//! Repository for the `modules` table.

use acordeon_core::types::DbId;
use sqlx::PgPool;

use crate::models::course_module::{CourseModule, CreateCourseModule};

const COLUMNS: &str = "id, course_id, title, order_index, created_at, updated_at";

/// Provides CRUD operations for course modules.
pub struct CourseModuleRepo;

impl CourseModuleRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateCourseModule,
    ) -> Result<CourseModule, sqlx::Error> {
        let query = format!(
            "INSERT INTO modules (course_id, title, order_index)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CourseModule>(&query)
            .bind(input.course_id)
            .bind(&input.title)
            .bind(input.order_index)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CourseModule>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM modules WHERE id = $1");
        sqlx::query_as::<_, CourseModule>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Modules of a course in display order.
    pub async fn list_by_course(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<CourseModule>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM modules WHERE course_id = $1 ORDER BY order_index, id"
        );
        sqlx::query_as::<_, CourseModule>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// Highest `order_index` among the course's modules, if any.
    pub async fn max_order_index(pool: &PgPool, course_id: DbId) -> Result<Option<i32>, sqlx::Error> {
        let row: (Option<i32>,) =
            sqlx::query_as("SELECT MAX(order_index) FROM modules WHERE course_id = $1")
                .bind(course_id)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }
}
