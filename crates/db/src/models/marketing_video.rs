//! Landing-page promotional video model.

use acordeon_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `marketing_videos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MarketingVideo {
    pub id: DbId,
    pub title: String,
    pub video_provider_id: String,
    pub order_index: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
}
