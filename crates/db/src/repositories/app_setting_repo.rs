//! Repository for the `app_settings` table.

use sqlx::{PgExecutor, PgPool};

use crate::models::app_setting::AppSetting;

/// Key/value settings editable by the administrator.
pub struct AppSettingRepo;

impl AppSettingRepo {
    /// All settings ordered by key.
    pub async fn list(pool: &PgPool) -> Result<Vec<AppSetting>, sqlx::Error> {
        sqlx::query_as::<_, AppSetting>(
            "SELECT key, value, label, updated_at FROM app_settings ORDER BY key",
        )
        .fetch_all(pool)
        .await
    }

    /// Value of a single setting, if the key exists.
    pub async fn get_value(pool: &PgPool, key: &str) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT value FROM app_settings WHERE key = $1")
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite an existing setting. Returns `None` for unknown keys.
    ///
    /// Accepts a pool or an open transaction so batch saves can share one.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        key: &str,
        value: &str,
    ) -> Result<Option<AppSetting>, sqlx::Error> {
        sqlx::query_as::<_, AppSetting>(
            "UPDATE app_settings SET value = $2 WHERE key = $1
             RETURNING key, value, label, updated_at",
        )
        .bind(key)
        .bind(value)
        .fetch_optional(executor)
        .await
    }
}
