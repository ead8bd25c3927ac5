//! QR code rendering for share links.
//!
//! Output is a grayscale PNG: 5 pixels per module, a 2-module quiet zone,
//! QR version auto-sized to fit the URL.  Rendering is deterministic — the
//! same URL always yields the same bytes.

use std::io::Cursor;

use image::{GrayImage, Luma};
use qrcode::QrCode;
use thiserror::Error;

/// Pixels per QR module.
const MODULE_PX: u32 = 5;
/// Quiet-zone width in modules on every side.
const BORDER_MODULES: u32 = 2;

/// Errors from QR rendering.
#[derive(Debug, Error)]
pub enum QrError {
    /// The data did not fit any QR version (URLs never hit this in practice).
    #[error("failed to encode QR code: {0}")]
    Encode(String),

    /// PNG encoding failed.
    #[error("failed to encode QR image as PNG: {0}")]
    Png(String),
}

/// Render `url` as a PNG-encoded QR code image.
pub fn make_qr_png(url: &str) -> Result<Vec<u8>, QrError> {
    let code = QrCode::new(url.as_bytes()).map_err(|e| QrError::Encode(e.to_string()))?;

    // The renderer's built-in quiet zone is 4 modules wide; render without it
    // and pad the 2-module border ourselves.
    let modules: GrayImage = code
        .render::<Luma<u8>>()
        .module_dimensions(MODULE_PX, MODULE_PX)
        .quiet_zone(false)
        .build();

    let border = BORDER_MODULES * MODULE_PX;
    let mut framed = GrayImage::from_pixel(
        modules.width() + 2 * border,
        modules.height() + 2 * border,
        Luma([255u8]),
    );
    image::imageops::replace(&mut framed, &modules, i64::from(border), i64::from(border));

    let mut png = Vec::new();
    framed
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(|e| QrError::Png(e.to_string()))?;
    Ok(png)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
