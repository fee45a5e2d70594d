//! Profile (account) entity model and DTOs.

use acordeon_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full row from the `profiles` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`ProfileResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Profile {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub display_name: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe profile representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: DbId,
    pub email: String,
    pub role: String,
    pub display_name: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: Timestamp,
}

impl From<&Profile> for ProfileResponse {
    fn from(p: &Profile) -> Self {
        Self {
            id: p.id,
            email: p.email.clone(),
            role: p.role.clone(),
            display_name: p.display_name.clone(),
            phone: p.phone.clone(),
            avatar_url: p.avatar_url.clone(),
            created_at: p.created_at,
        }
    }
}

/// DTO for creating a new profile.
#[derive(Debug, Deserialize)]
pub struct CreateProfile {
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub display_name: Option<String>,
    pub phone: Option<String>,
}

/// DTO for a user editing their own profile.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfile {
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Minimal author info joined onto comments and admin listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudentSummary {
    pub id: DbId,
    pub display_name: Option<String>,
    pub email: String,
    pub created_at: Timestamp,
}
