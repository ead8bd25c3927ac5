//! Share publishing module.
//!
//! This module provides:
//! * [`ShareUploader`] — async trait implemented by file-hosting backends.
//! * [`FileIoUploader`] — file.io multipart upload with a bounded timeout.
//! * [`SharePublisher`] — write-to-disk + upload + QR, never fails.
//! * [`qr::make_qr_png`] — deterministic QR PNG rendering.
//! * [`ShareError`] — error variants for the upload side channel.
//!
//! Publishing is a best-effort side channel: callers receive an explicit
//! [`PublishOutcome`] with optional fields rather than an error.

pub mod publisher;
pub mod qr;
pub mod uploader;

pub use publisher::{narration_file_name, PublishOutcome, ShareLink, SharePublisher};
pub use qr::{make_qr_png, QrError};
pub use uploader::{parse_upload_response, FileIoUploader, ShareError, ShareUploader};
