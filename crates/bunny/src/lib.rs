//! REST client for the Bunny Stream video library API.
//!
//! Only the call the platform needs is wrapped: creating an empty video
//! entry whose GUID is then used to authorize a resumable browser upload.

use serde::{Deserialize, Serialize};

/// Default base URL of the Bunny Stream management API.
pub const DEFAULT_API_BASE_URL: &str = "https://video.bunnycdn.com";

/// HTTP client for the Bunny Stream API.
#[derive(Debug, Clone)]
pub struct BunnyStreamApi {
    client: reqwest::Client,
    api_url: String,
}

/// A freshly created (still empty) video entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CreatedVideo {
    /// Video id assigned by the library. Stored as `lessons.video_provider_id`.
    pub guid: String,
    pub title: String,
    #[serde(rename = "videoLibraryId")]
    pub library_id: i64,
}

/// Errors from the Bunny Stream API layer.
#[derive(Debug, thiserror::Error)]
pub enum BunnyApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Bunny returned a non-2xx status code.
    #[error("Bunny Stream API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

#[derive(Serialize)]
struct CreateVideoBody<'a> {
    title: &'a str,
}

impl BunnyStreamApi {
    /// Create a client for the given API base URL, e.g. `https://video.bunnycdn.com`.
    pub fn new(api_url: String) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: String) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Create a video entry in a library.
    ///
    /// Sends `POST /library/{library_id}/videos` authenticated with the
    /// library's `AccessKey`.
    pub async fn create_video(
        &self,
        library_id: &str,
        api_key: &str,
        title: &str,
    ) -> Result<CreatedVideo, BunnyApiError> {
        let response = self
            .client
            .post(format!("{}/library/{library_id}/videos", self.api_url))
            .header("AccessKey", api_key)
            .json(&CreateVideoBody { title })
            .send()
            .await?;

        let video: CreatedVideo = Self::parse_response(response).await?;
        tracing::info!(library_id, guid = %video.guid, "Created Bunny Stream video entry");
        Ok(video)
    }

    // ---- private helpers ----

    /// Return the response unchanged on success, or an
    /// [`BunnyApiError::ApiError`] with the status and body text.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, BunnyApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(BunnyApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, BunnyApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
