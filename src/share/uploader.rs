//! `ShareUploader` trait and the file.io implementation.
//!
//! The upload is a single multipart POST with a bounded timeout.  The
//! response is JSON; success requires a truthy `success` flag **and** a
//! non-empty `link` — anything else is a typed error.  Callers higher up
//! (the [`SharePublisher`](crate::share::SharePublisher)) downgrade every
//! error to "no link available".

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::config::ShareConfig;

// ---------------------------------------------------------------------------
// ShareError
// ---------------------------------------------------------------------------

/// Errors from the upload side channel.
#[derive(Debug, Clone, Error)]
pub enum ShareError {
    /// HTTP transport or connection error.
    #[error("upload request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("upload timed out")]
    Timeout,

    /// The response body was not the expected JSON shape.
    #[error("failed to parse upload response: {0}")]
    Parse(String),

    /// The host answered, but without a truthy success flag or usable link.
    #[error("upload rejected by host: {0}")]
    Rejected(String),
}

impl From<reqwest::Error> for ShareError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ShareError::Timeout
        } else {
            ShareError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// ShareUploader trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface to a file-hosting service.
///
/// On success, returns the public URL under which `bytes` can be fetched.
#[async_trait]
pub trait ShareUploader: Send + Sync {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, ShareError>;
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Wire shape of the file.io response.  Missing fields default to failure.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    link: Option<String>,
}

/// Extract the share link from a response body.
///
/// Succeeds only when `success` is true and `link` is present and non-empty.
pub fn parse_upload_response(body: &str) -> Result<String, ShareError> {
    let response: UploadResponse =
        serde_json::from_str(body).map_err(|e| ShareError::Parse(e.to_string()))?;

    if !response.success {
        return Err(ShareError::Rejected("success flag not set".into()));
    }
    match response.link {
        Some(link) if !link.is_empty() => Ok(link),
        _ => Err(ShareError::Rejected("no link in response".into())),
    }
}

// ---------------------------------------------------------------------------
// FileIoUploader
// ---------------------------------------------------------------------------

/// Uploads narration files to a file.io-compatible endpoint.
pub struct FileIoUploader {
    client: reqwest::Client,
    config: ShareConfig,
}

impl FileIoUploader {
    /// Build an uploader from application config.
    ///
    /// The HTTP client carries the bounded per-request timeout from
    /// `config.timeout_secs` (30 s by default).  A default client is used as
    /// a last-resort fallback if the builder fails (should never happen in
    /// practice).
    pub fn from_config(config: &ShareConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }
}

#[async_trait]
impl ShareUploader for FileIoUploader {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, ShareError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("audio/mpeg")
            .map_err(|e| ShareError::Request(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        log::debug!(
            "uploading {file_name} to {} (timeout {}s)",
            self.config.endpoint,
            self.config.timeout_secs
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .multipart(form)
            .send()
            .await?;

        let body = response.text().await?;
        parse_upload_response(&body)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_success_with_link() {
        let body = r#"{"success":true,"link":"https://file.io/abc123"}"#;
        assert_eq!(parse_upload_response(body).unwrap(), "https://file.io/abc123");
    }

    #[test]
    fn parse_rejects_missing_success_flag() {
        let body = r#"{"link":"https://file.io/abc123"}"#;
        assert!(matches!(
            parse_upload_response(body).unwrap_err(),
            ShareError::Rejected(_)
        ));
    }

    #[test]
    fn parse_rejects_false_success_flag() {
        let body = r#"{"success":false,"link":"https://file.io/abc123"}"#;
        assert!(matches!(
            parse_upload_response(body).unwrap_err(),
            ShareError::Rejected(_)
        ));
    }

    #[test]
    fn parse_rejects_missing_link() {
        let body = r#"{"success":true}"#;
        assert!(matches!(
            parse_upload_response(body).unwrap_err(),
            ShareError::Rejected(_)
        ));
    }

    #[test]
    fn parse_rejects_empty_link() {
        let body = r#"{"success":true,"link":""}"#;
        assert!(matches!(
            parse_upload_response(body).unwrap_err(),
            ShareError::Rejected(_)
        ));
    }

    #[test]
    fn parse_rejects_non_json_body() {
        assert!(matches!(
            parse_upload_response("<html>502</html>").unwrap_err(),
            ShareError::Parse(_)
        ));
    }

    #[test]
    fn parse_ignores_extra_fields() {
        let body = r#"{"success":true,"key":"abc123","expiry":"14 days","link":"https://file.io/abc123"}"#;
        assert_eq!(parse_upload_response(body).unwrap(), "https://file.io/abc123");
    }

    #[test]
    fn from_config_builds_without_panic() {
        let _uploader = FileIoUploader::from_config(&ShareConfig::default());
    }

    /// Verify that `FileIoUploader` is usable as `dyn ShareUploader`.
    #[test]
    fn uploader_is_object_safe() {
        let uploader: Box<dyn ShareUploader> =
            Box::new(FileIoUploader::from_config(&ShareConfig::default()));
        drop(uploader);
    }
}
