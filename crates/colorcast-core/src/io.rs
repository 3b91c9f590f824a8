//! Image loading and saving.
//!
//! Decoding and encoding go through the `image` crate, so any format it has
//! enabled works (PNG, JPEG, BMP, and TIFF at minimum). Loaded images are
//! normalized to RGB; saved images are quantized to 8 bits per channel.

use std::path::Path;

use crate::error::{FormatIssue, ImageIoError, Result, TransferError};
use crate::image::TransferImage;
use crate::normalize::{Conversion, DecodedImage, normalize};

/// Load an image from disk and normalize it to 3-channel RGB in `[0, 1]`.
pub fn load(path: &Path) -> Result<TransferImage> {
    load_with_report(path).map(|(image, _)| image)
}

/// Like [`load`], also reporting what normalization did to the file.
pub fn load_with_report(path: &Path) -> Result<(TransferImage, Conversion)> {
    let load_err = |source: ImageIoError| TransferError::Load {
        path: path.to_path_buf(),
        source,
    };

    let dynamic = ::image::open(path).map_err(|e| load_err(e.into()))?;
    let decoded = DecodedImage::from_dynamic(&dynamic);
    let (image, conversion) = normalize(decoded).map_err(|e| match e {
        TransferError::UnsupportedFormat(issue) => load_err(issue.into()),
        other => other,
    })?;

    tracing::info!("loaded {} ({image}, {conversion})", path.display());
    Ok((image, conversion))
}

/// Quantize to 8-bit and write to `path`; the extension picks the encoder.
///
/// Each sample is stored as `round(clamp(x, 0, 1) * 255)`.
pub fn save(image: &TransferImage, path: &Path) -> Result<()> {
    let raw: Vec<u8> = image
        .pixels()
        .iter()
        .flat_map(|px| px.iter().map(|&v| quantize(v)))
        .collect();

    let save_err = |source: ImageIoError| TransferError::Save {
        path: path.to_path_buf(),
        source,
    };

    let expected = image.width() as usize * image.height() as usize * 3;
    let actual = raw.len();
    let buffer = ::image::RgbImage::from_raw(image.width(), image.height(), raw)
        .ok_or_else(|| save_err(FormatIssue::SampleCount { expected, actual }.into()))?;
    buffer.save(path).map_err(|e| save_err(e.into()))?;

    tracing::info!("saved {} ({image})", path.display());
    Ok(())
}

fn quantize(v: f32) -> u8 {
    // NaN clamps to NaN; treat it as black.
    if v.is_nan() {
        return 0;
    }
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
