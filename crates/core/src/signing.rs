//! Bunny Stream token signing.
//!
//! Two signatures are produced here, both hex-encoded SHA-256 digests over a
//! plain concatenation of their inputs:
//!
//! - **Playback**: `SHA256(security_key || video_id || expires)`, embedded in
//!   the player iframe URL. The video host recomputes the same hash to
//!   authenticate the viewer, so the output is deterministic and carries no
//!   nonce.
//! - **Upload**: `SHA256(library_id || api_key || expiration || video_id)`,
//!   handed to the browser so it can run a resumable upload without ever
//!   seeing the API key.

use serde::Serialize;

use crate::hashing::sha256_hex;
use crate::types::Timestamp;

/// Default lifetime of a playback token (1 hour).
pub const DEFAULT_PLAYBACK_TTL_SECS: i64 = 3600;

/// Default lifetime of an upload authorization (24 hours).
pub const DEFAULT_UPLOAD_TTL_SECS: i64 = 86_400;

/// Default host serving the embeddable player.
pub const DEFAULT_EMBED_BASE_URL: &str = "https://iframe.mediadelivery.net";

/// Errors from token signing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SigningError {
    /// A credential required for signing is not configured.
    #[error("{0} is not configured")]
    ConfigurationMissing(&'static str),
}

/// Credentials used for signing, loaded from the process environment.
///
/// Every credential is optional so a missing one surfaces as a per-request
/// [`SigningError::ConfigurationMissing`] instead of a startup failure.
#[derive(Debug, Clone, Default)]
pub struct SigningConfig {
    /// Token authentication key of the video library (`BUNNY_SECURITY_KEY`).
    pub security_key: Option<String>,
    /// Video library id (`BUNNY_LIBRARY_ID`).
    pub library_id: Option<String>,
    /// Library API key (`BUNNY_API_KEY`). Only needed for uploads.
    pub api_key: Option<String>,
    /// Base URL of the player host, without a trailing slash.
    pub embed_base_url: String,
}

impl SigningConfig {
    fn security_key(&self) -> Result<&str, SigningError> {
        require(&self.security_key, "BUNNY_SECURITY_KEY")
    }

    fn library_id(&self) -> Result<&str, SigningError> {
        require(&self.library_id, "BUNNY_LIBRARY_ID")
    }

    fn api_key(&self) -> Result<&str, SigningError> {
        require(&self.api_key, "BUNNY_API_KEY")
    }

    /// `(library_id, api_key)` for calls to the management API.
    pub fn management_credentials(&self) -> Result<(&str, &str), SigningError> {
        Ok((self.library_id()?, self.api_key()?))
    }
}

/// Treat an empty value the same as an absent one.
fn require<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str, SigningError> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(SigningError::ConfigurationMissing(name)),
    }
}

/// A signed, time-limited playback credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaybackToken {
    pub token: String,
    /// Expiration as UNIX seconds.
    pub expires: i64,
    pub embed_url: String,
}

/// Hex digest authenticating playback of `video_id` until `expires`.
pub fn sign_playback(security_key: &str, video_id: &str, expires: i64) -> String {
    sha256_hex(format!("{security_key}{video_id}{expires}").as_bytes())
}

/// Build the player iframe URL carrying a playback token.
pub fn embed_url(
    embed_base_url: &str,
    library_id: &str,
    video_id: &str,
    token: &str,
    expires: i64,
) -> String {
    format!(
        "{}/embed/{library_id}/{video_id}?token={token}&expires={expires}",
        embed_base_url.trim_end_matches('/')
    )
}

/// Produce a playback token that expires `ttl_secs` after `now`.
///
/// Fails with [`SigningError::ConfigurationMissing`] when the security key
/// or library id is absent. No partial result is ever returned.
pub fn generate_playback_token(
    config: &SigningConfig,
    video_id: &str,
    ttl_secs: i64,
    now: Timestamp,
) -> Result<PlaybackToken, SigningError> {
    let security_key = config.security_key()?;
    let library_id = config.library_id()?;

    let expires = now.timestamp() + ttl_secs;
    let token = sign_playback(security_key, video_id, expires);
    let embed_url = embed_url(&config.embed_base_url, library_id, video_id, &token, expires);

    Ok(PlaybackToken {
        token,
        expires,
        embed_url,
    })
}

/// Pre-signed credentials for a resumable upload session.
///
/// Field names serialize to the header names the upload client sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadAuthorization {
    #[serde(rename = "AuthorizationSignature")]
    pub signature: String,
    #[serde(rename = "AuthorizationExpire")]
    pub expiration_time: i64,
    #[serde(rename = "VideoId")]
    pub video_id: String,
    #[serde(rename = "LibraryId")]
    pub library_id: String,
}

/// Hex digest authorizing an upload of `video_id` until `expiration_time`.
pub fn sign_upload(library_id: &str, api_key: &str, expiration_time: i64, video_id: &str) -> String {
    sha256_hex(format!("{library_id}{api_key}{expiration_time}{video_id}").as_bytes())
}

/// Produce an upload authorization that expires `ttl_secs` after `now`.
pub fn generate_upload_authorization(
    config: &SigningConfig,
    video_id: &str,
    ttl_secs: i64,
    now: Timestamp,
) -> Result<UploadAuthorization, SigningError> {
    let api_key = config.api_key()?;
    let library_id = config.library_id()?;

    let expiration_time = now.timestamp() + ttl_secs;
    Ok(UploadAuthorization {
        signature: sign_upload(library_id, api_key, expiration_time, video_id),
        expiration_time,
        video_id: video_id.to_string(),
        library_id: library_id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn configured() -> SigningConfig {
        SigningConfig {
            security_key: Some("s3cr3t".to_string()),
            library_id: Some("12345".to_string()),
            api_key: Some("api-key".to_string()),
            embed_base_url: DEFAULT_EMBED_BASE_URL.to_string(),
        }
    }

    fn at_unix(secs: i64) -> Timestamp {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn playback_signature_matches_concatenated_digest() {
        let token = sign_playback("s3cr3t", "abc123", 1_700_000_000);
        assert_eq!(token, sha256_hex(b"s3cr3tabc1231700000000"));
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn embed_url_carries_token_and_expiry() {
        let now = at_unix(1_700_000_000 - DEFAULT_PLAYBACK_TTL_SECS);
        let result =
            generate_playback_token(&configured(), "abc123", DEFAULT_PLAYBACK_TTL_SECS, now)
                .unwrap();

        assert_eq!(result.expires, 1_700_000_000);
        assert_eq!(result.token, sha256_hex(b"s3cr3tabc1231700000000"));
        assert_eq!(
            result.embed_url,
            format!(
                "https://iframe.mediadelivery.net/embed/12345/abc123?token={}&expires=1700000000",
                result.token
            )
        );
    }

    #[test]
    fn playback_token_is_deterministic() {
        let now = at_unix(1_650_000_000);
        let a = generate_playback_token(&configured(), "vid", 600, now).unwrap();
        let b = generate_playback_token(&configured(), "vid", 600, now).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn missing_security_key_is_an_error() {
        let config = SigningConfig {
            security_key: None,
            ..configured()
        };
        let result = generate_playback_token(&config, "vid", 60, Utc::now());
        assert_eq!(
            result,
            Err(SigningError::ConfigurationMissing("BUNNY_SECURITY_KEY"))
        );
    }

    #[test]
    fn empty_library_id_is_an_error() {
        let config = SigningConfig {
            library_id: Some(String::new()),
            ..configured()
        };
        let result = generate_playback_token(&config, "vid", 60, Utc::now());
        assert_eq!(
            result,
            Err(SigningError::ConfigurationMissing("BUNNY_LIBRARY_ID"))
        );
    }

    #[test]
    fn trailing_slash_on_embed_base_is_ignored() {
        let url = embed_url("https://player.example/", "1", "v", "t", 5);
        assert_eq!(url, "https://player.example/embed/1/v?token=t&expires=5");
    }

    #[test]
    fn upload_signature_uses_library_first_order() {
        let now = at_unix(1_700_000_000);
        let auth =
            generate_upload_authorization(&configured(), "guid-1", DEFAULT_UPLOAD_TTL_SECS, now)
                .unwrap();

        assert_eq!(auth.expiration_time, 1_700_086_400);
        assert_eq!(
            auth.signature,
            sha256_hex(b"12345api-key1700086400guid-1")
        );
        assert_eq!(auth.video_id, "guid-1");
        assert_eq!(auth.library_id, "12345");
    }

    #[test]
    fn upload_authorization_serializes_as_header_names() {
        let auth = UploadAuthorization {
            signature: "sig".into(),
            expiration_time: 10,
            video_id: "v".into(),
            library_id: "l".into(),
        };
        let json = serde_json::to_value(&auth).unwrap();
        assert_eq!(json["AuthorizationSignature"], "sig");
        assert_eq!(json["AuthorizationExpire"], 10);
        assert_eq!(json["VideoId"], "v");
        assert_eq!(json["LibraryId"], "l");
    }

    #[test]
    fn upload_requires_api_key() {
        let config = SigningConfig {
            api_key: None,
            ..configured()
        };
        let result = generate_upload_authorization(&config, "v", 60, Utc::now());
        assert_eq!(result, Err(SigningError::ConfigurationMissing("BUNNY_API_KEY")));
    }

    #[test]
    fn management_credentials_need_library_and_key() {
        assert_eq!(configured().management_credentials(), Ok(("12345", "api-key")));

        let config = SigningConfig {
            library_id: None,
            ..configured()
        };
        assert_eq!(
            config.management_credentials(),
            Err(SigningError::ConfigurationMissing("BUNNY_LIBRARY_ID"))
        );
    }
}
