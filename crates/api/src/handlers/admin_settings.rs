//! Admin key/value settings.

use acordeon_db::models::app_setting::AppSetting;
use acordeon_db::repositories::AppSettingRepo;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireMaster;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateSettingRequest {
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct SettingValue {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct SaveSettingsRequest {
    pub settings: Vec<SettingValue>,
}

/// GET /api/v1/admin/settings
pub async fn list_settings(
    RequireMaster(_admin): RequireMaster,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<AppSetting>>>> {
    let settings = AppSettingRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: settings }))
}

/// PUT /api/v1/admin/settings/{key}
pub async fn update_setting(
    RequireMaster(admin): RequireMaster,
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(input): Json<UpdateSettingRequest>,
) -> AppResult<Json<DataResponse<AppSetting>>> {
    let setting = AppSettingRepo::update(&state.pool, &key, &input.value)
        .await?
        .ok_or_else(|| unknown_key(&key))?;

    tracing::info!(key = %key, admin_id = admin.user_id, "Setting updated");
    Ok(Json(DataResponse { data: setting }))
}

/// PUT /api/v1/admin/settings
///
/// Save several settings at once. The batch runs in one transaction: an
/// unknown key or a failed write leaves every setting unchanged.
pub async fn save_settings(
    RequireMaster(admin): RequireMaster,
    State(state): State<AppState>,
    Json(input): Json<SaveSettingsRequest>,
) -> AppResult<Json<DataResponse<Vec<AppSetting>>>> {
    if input.settings.is_empty() {
        return Err(AppError::BadRequest(
            "No se recibieron claves de configuración".into(),
        ));
    }

    let mut tx = state.pool.begin().await?;
    for setting in &input.settings {
        let key = setting.key.trim();
        // Dropping `tx` on the early return rolls back earlier writes.
        AppSettingRepo::update(&mut *tx, key, &setting.value)
            .await?
            .ok_or_else(|| unknown_key(key))?;
    }
    tx.commit().await?;

    tracing::info!(count = input.settings.len(), admin_id = admin.user_id, "Settings saved");
    let settings = AppSettingRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: settings }))
}

fn unknown_key(key: &str) -> AppError {
    AppError::NotFound(format!("Configuración desconocida: {key}"))
}
