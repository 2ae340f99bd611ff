// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Optional logo drawn in the top-right corner of the label.
//
// The logo is a soft dependency: a missing or undecodable file is logged and
// the label is produced without it.

use std::path::Path;

use ::image::DynamicImage;
use labelwerk_core::error::{LabelwerkError, Result};
use tracing::{debug, info, instrument, warn};

/// Longest side kept after loading; the logo box is only 0.6" wide.
pub const MAX_LOGO_SIDE_PX: u32 = 600;

/// A decoded logo image.
#[derive(Debug, Clone)]
pub struct Logo {
    image: DynamicImage,
}

impl Logo {
    /// Load a logo from disk.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LabelwerkError::AssetMissing(format!(
                "logo file '{}' not found",
                path.display()
            )));
        }
        let img = ::image::open(path).map_err(|err| {
            LabelwerkError::AssetMissing(format!("could not load logo {}: {}", path.display(), err))
        })?;
        info!(width = img.width(), height = img.height(), "Logo loaded");
        Ok(Self::from_dynamic(img))
    }

    /// Load a logo, or log a warning and return `None`.
    pub fn load_optional(path: impl AsRef<Path>) -> Option<Self> {
        match Self::load(path) {
            Ok(logo) => Some(logo),
            Err(err) => {
                warn!(error = %err, "skipping logo");
                None
            }
        }
    }

    /// Decode a logo from encoded bytes (JPEG, PNG, etc.).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let img = ::image::load_from_memory(data).map_err(|err| {
            LabelwerkError::AssetMissing(format!("failed to decode logo: {}", err))
        })?;
        Ok(Self::from_dynamic(img))
    }

    /// Wrap an already-decoded image, downscaling oversized ones.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        if image.width().max(image.height()) <= MAX_LOGO_SIDE_PX {
            return Self { image };
        }
        let resized = image.resize(
            MAX_LOGO_SIDE_PX,
            MAX_LOGO_SIDE_PX,
            ::image::imageops::FilterType::Lanczos3,
        );
        debug!(
            from_w = image.width(),
            from_h = image.height(),
            new_w = resized.width(),
            new_h = resized.height(),
            "Logo downscaled"
        );
        Self { image: resized }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Width / height.
    pub fn aspect_ratio(&self) -> f32 {
        self.image.width() as f32 / self.image.height().max(1) as f32
    }

    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }
}
