use std::path::PathBuf;

use acordeon_core::signing::{
    SigningConfig, DEFAULT_EMBED_BASE_URL, DEFAULT_PLAYBACK_TTL_SECS, DEFAULT_UPLOAD_TTL_SECS,
};

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on draining in-flight requests after a shutdown signal.
    pub shutdown_timeout_secs: u64,
    /// Directory holding course thumbnails (`THUMBNAIL_DIR`).
    pub thumbnail_dir: PathBuf,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Video host credentials and token lifetimes.
    pub bunny: BunnyConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3001`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    /// | `THUMBNAIL_DIR`        | `./storage`                |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:3001".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let thumbnail_dir =
            PathBuf::from(std::env::var("THUMBNAIL_DIR").unwrap_or_else(|_| "./storage".into()));

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            thumbnail_dir,
            jwt: JwtConfig::from_env(),
            bunny: BunnyConfig::from_env(),
        }
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Bunny Stream settings.
///
/// Credentials are optional: a missing one is reported per request as
/// "video unavailable" rather than preventing startup.
#[derive(Debug, Clone)]
pub struct BunnyConfig {
    pub signing: SigningConfig,
    /// Management API base URL (default: `https://video.bunnycdn.com`).
    pub api_url: String,
    pub playback_ttl_secs: i64,
    pub upload_ttl_secs: i64,
}

impl Default for BunnyConfig {
    fn default() -> Self {
        Self {
            signing: SigningConfig {
                embed_base_url: DEFAULT_EMBED_BASE_URL.to_string(),
                ..SigningConfig::default()
            },
            api_url: acordeon_bunny::DEFAULT_API_BASE_URL.to_string(),
            playback_ttl_secs: DEFAULT_PLAYBACK_TTL_SECS,
            upload_ttl_secs: DEFAULT_UPLOAD_TTL_SECS,
        }
    }
}

impl BunnyConfig {
    /// Load Bunny settings from environment variables.
    ///
    /// | Env Var                   | Required | Default                            |
    /// |---------------------------|----------|------------------------------------|
    /// | `BUNNY_SECURITY_KEY`      | no       | --                                 |
    /// | `BUNNY_LIBRARY_ID`        | no       | --                                 |
    /// | `BUNNY_API_KEY`           | no       | --                                 |
    /// | `BUNNY_EMBED_BASE_URL`    | no       | `https://iframe.mediadelivery.net` |
    /// | `BUNNY_API_URL`           | no       | `https://video.bunnycdn.com`       |
    /// | `BUNNY_PLAYBACK_TTL_SECS` | no       | `3600`                             |
    /// | `BUNNY_UPLOAD_TTL_SECS`   | no       | `86400`                            |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let signing = SigningConfig {
            security_key: std::env::var("BUNNY_SECURITY_KEY").ok(),
            library_id: std::env::var("BUNNY_LIBRARY_ID").ok(),
            api_key: std::env::var("BUNNY_API_KEY").ok(),
            embed_base_url: std::env::var("BUNNY_EMBED_BASE_URL")
                .unwrap_or(defaults.signing.embed_base_url),
        };

        let playback_ttl_secs: i64 = std::env::var("BUNNY_PLAYBACK_TTL_SECS")
            .map(|v| v.parse().expect("BUNNY_PLAYBACK_TTL_SECS must be a valid i64"))
            .unwrap_or(defaults.playback_ttl_secs);

        let upload_ttl_secs: i64 = std::env::var("BUNNY_UPLOAD_TTL_SECS")
            .map(|v| v.parse().expect("BUNNY_UPLOAD_TTL_SECS must be a valid i64"))
            .unwrap_or(defaults.upload_ttl_secs);

        if signing.security_key.is_none() {
            tracing::warn!("BUNNY_SECURITY_KEY not set; lesson videos will be unavailable");
        }

        Self {
            signing,
            api_url: std::env::var("BUNNY_API_URL").unwrap_or(defaults.api_url),
            playback_ttl_secs,
            upload_ttl_secs,
        }
    }
}
