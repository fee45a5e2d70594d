//! Repository for the `profiles` table.

use acordeon_core::roles::ROLE_STUDENT;
use acordeon_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::{CreateProfile, Profile, StudentSummary, UpdateProfile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, role, display_name, phone, avatar_url, \
                        is_active, created_at, updated_at";

/// Provides CRUD operations for profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Insert a new profile, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProfile) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (email, password_hash, role, display_name, phone)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .bind(&input.display_name)
            .bind(&input.phone)
            .fetch_one(pool)
            .await
    }

    /// Find a profile by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a profile by email (case-insensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE lower(email) = lower($1)");
        sqlx::query_as::<_, Profile>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List student profiles, most recently registered first.
    pub async fn list_students(pool: &PgPool) -> Result<Vec<StudentSummary>, sqlx::Error> {
        sqlx::query_as::<_, StudentSummary>(
            "SELECT id, display_name, email, created_at FROM profiles
             WHERE role = $1
             ORDER BY created_at DESC",
        )
        .bind(ROLE_STUDENT)
        .fetch_all(pool)
        .await
    }

    /// Update display name and/or avatar. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET
                display_name = COALESCE($2, display_name),
                avatar_url = COALESCE($3, avatar_url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .bind(&input.display_name)
            .bind(&input.avatar_url)
            .fetch_optional(pool)
            .await
    }

    /// Update a profile's password hash. Returns `true` if the row was updated.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE profiles SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
