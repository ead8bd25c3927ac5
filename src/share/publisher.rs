//! Best-effort share publishing.
//!
//! [`SharePublisher::publish`] writes the narration MP3 to disk, uploads it,
//! and renders a QR code for the returned link.  It **never** returns an
//! error: every failure along the way is logged and mapped to an absent field
//! in [`PublishOutcome`], so callers are forced to handle the degraded cases
//! explicitly.  Publish failure never blocks the workflow — the caller still
//! holds playable audio.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::share::qr::make_qr_png;
use crate::share::uploader::ShareUploader;

// ---------------------------------------------------------------------------
// Outcome types
// ---------------------------------------------------------------------------

/// A successfully published share link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    /// Public URL under which the narration can be fetched.
    pub url: String,
    /// PNG QR image encoding exactly `url`; `None` only if QR rendering
    /// itself failed.
    pub qr_png: Option<Vec<u8>>,
}

/// Result of one publish attempt.  Both fields degrade independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    /// Where the narration was written locally, when the write succeeded.
    pub saved_path: Option<PathBuf>,
    /// The share link, when upload succeeded.
    pub link: Option<ShareLink>,
}

// ---------------------------------------------------------------------------
// SharePublisher
// ---------------------------------------------------------------------------

/// Persists a narration locally and best-effort publishes it.
pub struct SharePublisher {
    uploader: Arc<dyn ShareUploader>,
    output_dir: PathBuf,
}

/// Generate a fresh narration file name.
///
/// `narration_<UTC YYYYMMDD_HHMMSS>_<8 hex>.mp3` — the timestamp keeps files
/// sortable, the random suffix prevents same-second collisions from
/// overwriting an earlier narration.
pub fn narration_file_name() -> String {
    let stamp = Utc::now().format("%Y%m%d_%H%M%S");
    let id = Uuid::new_v4().simple().to_string();
    format!("narration_{stamp}_{}.mp3", &id[..8])
}

impl SharePublisher {
    pub fn new(uploader: Arc<dyn ShareUploader>, output_dir: PathBuf) -> Self {
        Self {
            uploader,
            output_dir,
        }
    }

    /// Write the audio to disk and attempt to publish it.
    ///
    /// Infallible by design: file-write, upload, and QR failures each degrade
    /// to `None` in the returned [`PublishOutcome`].
    pub async fn publish(&self, audio: &[u8]) -> PublishOutcome {
        let file_name = narration_file_name();
        let path = self.output_dir.join(&file_name);

        let saved_path = match tokio::fs::write(&path, audio).await {
            Ok(()) => {
                log::info!("narration saved to {}", path.display());
                Some(path)
            }
            Err(e) => {
                log::warn!("could not save narration to {}: {e}", path.display());
                None
            }
        };

        let url = match self.uploader.upload(&file_name, audio.to_vec()).await {
            Ok(url) => url,
            Err(e) => {
                log::warn!("share upload failed: {e}");
                return PublishOutcome {
                    saved_path,
                    link: None,
                };
            }
        };

        let qr_png = match make_qr_png(&url) {
            Ok(png) => Some(png),
            Err(e) => {
                log::warn!("QR rendering failed for {url}: {e}");
                None
            }
        };

        log::info!("narration published: {url}");
        PublishOutcome {
            saved_path,
            link: Some(ShareLink { url, qr_png }),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
