// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// QR code rasterisation for the label.

use ::image::{DynamicImage, GrayImage, Luma};
use labelwerk_core::error::{LabelwerkError, Result};
use qrcode::{Color, EcLevel, QrCode};
use tracing::{debug, instrument};

/// Pixels per QR module.
pub const MODULE_PX: u32 = 10;
/// Quiet zone around the symbol, in modules.
pub const BORDER_MODULES: u32 = 1;

/// A rendered QR symbol, black on white.
#[derive(Debug, Clone)]
pub struct QrImage {
    image: GrayImage,
    modules: u32,
}

impl QrImage {
    /// Encode `payload` with low error correction (densest symbol that still
    /// scans reliably at label size) and rasterise it.
    #[instrument(skip(payload), fields(payload_len = payload.len()))]
    pub fn generate(payload: &str) -> Result<Self> {
        let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::L)
            .map_err(|e| LabelwerkError::QrEncode(e.to_string()))?;
        let modules = code.width() as u32;
        let colors = code.to_colors();

        let side = (modules + 2 * BORDER_MODULES) * MODULE_PX;
        let mut img = GrayImage::from_pixel(side, side, Luma([255u8]));

        for (i, color) in colors.iter().enumerate() {
            if *color != Color::Dark {
                continue;
            }
            let x = (i as u32 % modules + BORDER_MODULES) * MODULE_PX;
            let y = (i as u32 / modules + BORDER_MODULES) * MODULE_PX;
            for dy in 0..MODULE_PX {
                for dx in 0..MODULE_PX {
                    img.put_pixel(x + dx, y + dy, Luma([0u8]));
                }
            }
        }

        debug!(modules, side, version = ?code.version(), "QR symbol rasterised");
        Ok(Self {
            image: img,
            modules,
        })
    }

    /// Symbol width in modules, excluding the quiet zone.
    pub fn modules(&self) -> u32 {
        self.modules
    }

    /// Side length of the image in pixels.
    pub fn side_px(&self) -> u32 {
        self.image.width()
    }

    pub fn as_gray(&self) -> &GrayImage {
        &self.image
    }

    pub fn to_dynamic(&self) -> DynamicImage {
        DynamicImage::ImageLuma8(self.image.clone())
    }
}

/// Shorthand for [`QrImage::generate`].
pub fn generate_qr(payload: &str) -> Result<QrImage> {
    QrImage::generate(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_code_is_version_one() {
        let qr = QrImage::generate("R57NX98AAFC62AF2A").unwrap();
        // Version 1 is 21x21 modules.
        assert_eq!(qr.modules(), 21);
        assert_eq!(qr.side_px(), (21 + 2) * MODULE_PX);
    }

    #[test]
    fn border_is_white_and_finder_is_dark() {
        let qr = QrImage::generate("R57NX98AAFC62AF2A").unwrap();
        let img = qr.as_gray();
        assert_eq!(img.get_pixel(0, 0).0, [255]);
        assert_eq!(img.get_pixel(MODULE_PX - 1, MODULE_PX - 1).0, [255]);
        // Top-left finder pattern starts right after the one-module border.
        assert_eq!(img.get_pixel(MODULE_PX, MODULE_PX).0, [0]);
    }

    #[test]
    fn long_payload_grows_symbol() {
        let qr = QrImage::generate(&"ABCD1234".repeat(20)).unwrap();
        assert!(qr.modules() > 21);
        assert_eq!(qr.side_px(), qr.as_gray().height());
    }

    #[test]
    fn oversized_payload_is_an_encode_error() {
        let result = QrImage::generate(&"x".repeat(8000));
        assert!(matches!(result, Err(LabelwerkError::QrEncode(_))));
    }
}
