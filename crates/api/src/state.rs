use std::sync::Arc;

use acordeon_bunny::BunnyStreamApi;

use crate::config::ServerConfig;
use crate::storage::ThumbnailStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: acordeon_db::DbPool,
    /// Server configuration (JWT secret, Bunny credentials, ...).
    pub config: Arc<ServerConfig>,
    /// Bunny Stream management API client.
    pub bunny: Arc<BunnyStreamApi>,
    /// Storage backend holding course thumbnails.
    pub thumbnails: Arc<dyn ThumbnailStore>,
}
