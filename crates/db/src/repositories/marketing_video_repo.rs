//! Repository for the `marketing_videos` table.

use sqlx::PgPool;

use crate::models::marketing_video::MarketingVideo;

pub struct MarketingVideoRepo;

impl MarketingVideoRepo {
    /// Active promotional videos in display order.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<MarketingVideo>, sqlx::Error> {
        sqlx::query_as::<_, MarketingVideo>(
            "SELECT id, title, video_provider_id, order_index, is_active, created_at
             FROM marketing_videos
             WHERE is_active = true
             ORDER BY order_index, id",
        )
        .fetch_all(pool)
        .await
    }
}
