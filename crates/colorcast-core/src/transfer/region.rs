//! Luminance-based region selection for selective transfer.
//!
//! Luminance uses the Rec. 601 weights. The thresholds split `[0, 1]` into
//! three bands; both boundary values belong to the midtones, so every pixel
//! falls into exactly one band.

use serde::{Deserialize, Serialize};

use crate::config::Thresholds;
use crate::error::Result;
use crate::image::TransferImage;

/// Rec. 601 luminance weights.
pub const LUMA_REC601: [f32; 3] = [0.299, 0.587, 0.114];

/// Luminance band a selective transfer is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// Every pixel.
    Full,
    /// `L < shadow`
    Shadows,
    /// `shadow ≤ L ≤ highlight`
    Midtones,
    /// `L > highlight`
    Highlights,
}

impl Region {
    /// Human-readable label for UI menus and status text.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Full => "Full",
            Self::Shadows => "Shadows",
            Self::Midtones => "Midtones",
            Self::Highlights => "Highlights",
        }
    }

    /// Whether a pixel with luminance `lum` belongs to this band.
    pub fn contains(&self, lum: f32, thresholds: &Thresholds) -> bool {
        match self {
            Self::Full => true,
            Self::Shadows => lum < thresholds.shadow,
            Self::Midtones => lum >= thresholds.shadow && lum <= thresholds.highlight,
            Self::Highlights => lum > thresholds.highlight,
        }
    }

    /// Compute the hard mask of this band over `image`.
    pub fn mask(&self, image: &TransferImage, thresholds: &Thresholds) -> RegionMask {
        RegionMask {
            width: image.width(),
            height: image.height(),
            selected: image
                .pixels()
                .iter()
                .map(|&px| self.contains(luminance(px), thresholds))
                .collect(),
        }
    }
}

/// Weighted luminance of an RGB pixel.
pub fn luminance(rgb: [f32; 3]) -> f32 {
    rgb[0] * LUMA_REC601[0] + rgb[1] * LUMA_REC601[1] + rgb[2] * LUMA_REC601[2]
}

/// Per-pixel selection, one entry per pixel in row-major order.
///
/// Applied identically to all three channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionMask {
    pub width: u32,
    pub height: u32,
    pub selected: Vec<bool>,
}

impl RegionMask {
    /// Number of selected pixels.
    pub fn count(&self) -> usize {
        self.selected.iter().filter(|&&s| s).count()
    }

    /// `source × (1 − mask) + replacement × mask`, clamped to `[0, 1]`.
    ///
    /// With a hard mask this keeps unselected source pixels and takes
    /// selected pixels from `replacement` unchanged.
    pub fn composite(&self, source: &TransferImage, replacement: &TransferImage) -> Result<TransferImage> {
        source.ensure_same_shape(replacement)?;

        let pixels = source
            .pixels()
            .iter()
            .zip(replacement.pixels())
            .zip(&self.selected)
            .map(|((&src, &rep), &selected)| {
                let px = if selected { rep } else { src };
                px.map(|v| v.clamp(0.0, 1.0))
            })
            .collect();

        TransferImage::new(source.width(), source.height(), pixels)
    }
}
