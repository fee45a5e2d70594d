//! Lesson comment model and DTOs.

use acordeon_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub user_id: DbId,
    pub lesson_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
}

/// A comment with its author's display name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommentWithAuthor {
    pub id: DbId,
    pub user_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
    pub author_display_name: Option<String>,
}

/// DTO for posting a comment.
pub struct CreateComment {
    pub user_id: DbId,
    pub lesson_id: DbId,
    pub content: String,
}
