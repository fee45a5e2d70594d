//! Key/value application settings.

use acordeon_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

/// Setting key holding the WhatsApp number shown on the landing page.
pub const WHATSAPP_SUPPORT_NUMBER: &str = "whatsapp_support_number";

/// A row from the `app_settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AppSetting {
    pub key: String,
    pub value: String,
    pub label: Option<String>,
    pub updated_at: Timestamp,
}
