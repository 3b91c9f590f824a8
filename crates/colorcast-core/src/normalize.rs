//! Channel normalization: canonicalizes any decoded layout into RGB.
//!
//! Accepted layouts:
//! - rank 2 `[h, w]` grayscale, replicated into three channels
//! - rank 3 `[h, w, 1]`, replicated
//! - rank 3 `[h, w, 3]`, passed through
//! - rank 3 `[h, w, 4]`, alpha dropped
//!
//! Everything else is rejected with the offending rank or channel count.

use std::fmt;

use crate::error::{FormatIssue, Result};
use crate::image::TransferImage;

/// What normalization did to an input, for reporting back to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// Already three-channel RGB.
    Unchanged,
    /// Single channel replicated into R, G, and B.
    GrayscaleExpanded,
    /// Fourth (alpha) channel discarded.
    AlphaDropped,
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unchanged => write!(f, "RGB, no conversion"),
            Self::GrayscaleExpanded => write!(f, "grayscale converted to RGB"),
            Self::AlphaDropped => write!(f, "alpha channel removed"),
        }
    }
}

/// A decoded sample grid of arbitrary layout, before normalization.
///
/// `samples` is interleaved row-major: for shape `[h, w, c]` the sample at
/// `(y, x, k)` lives at `(y * w + x) * c + k`.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub shape: Vec<usize>,
    pub samples: Vec<f32>,
}

impl DecodedImage {
    /// Extract samples from a decoded `image` crate buffer, scaled to `[0, 1]`.
    ///
    /// Luma images become rank 2; every other layout becomes rank 3 with
    /// its native channel count, so luma+alpha surfaces as two channels and
    /// is rejected by [`normalize`].
    pub fn from_dynamic(img: &::image::DynamicImage) -> Self {
        let (width, height) = (img.width() as usize, img.height() as usize);
        let (shape, samples) = match img.color().channel_count() {
            1 => (vec![height, width], img.to_luma32f().into_raw()),
            2 => (vec![height, width, 2], img.to_luma_alpha32f().into_raw()),
            3 => (vec![height, width, 3], img.to_rgb32f().into_raw()),
            _ => (vec![height, width, 4], img.to_rgba32f().into_raw()),
        };
        // Float sources (EXR, HDR) may exceed the unit range.
        let samples = samples.into_iter().map(|v| v.clamp(0.0, 1.0)).collect();
        Self { shape, samples }
    }
}

/// Normalize a decoded image into a 3-channel [`TransferImage`].
pub fn normalize(decoded: DecodedImage) -> Result<(TransferImage, Conversion)> {
    let (height, width, channels) = match *decoded.shape.as_slice() {
        [h, w] => (h, w, 1),
        [h, w, c @ (1 | 3 | 4)] => (h, w, c),
        [_, _, c] => return Err(FormatIssue::Channels(c).into()),
        ref other => return Err(FormatIssue::Rank(other.len()).into()),
    };

    if height == 0 || width == 0 {
        return Err(FormatIssue::Empty.into());
    }
    let expected = height * width * channels;
    if decoded.samples.len() != expected {
        return Err(FormatIssue::SampleCount {
            expected,
            actual: decoded.samples.len(),
        }
        .into());
    }

    let (pixels, conversion) = match channels {
        1 => (
            decoded.samples.iter().map(|&v| [v, v, v]).collect(),
            Conversion::GrayscaleExpanded,
        ),
        3 => (
            decoded
                .samples
                .chunks_exact(3)
                .map(|px| [px[0], px[1], px[2]])
                .collect(),
            Conversion::Unchanged,
        ),
        _ => (
            decoded
                .samples
                .chunks_exact(4)
                .map(|px| [px[0], px[1], px[2]])
                .collect(),
            Conversion::AlphaDropped,
        ),
    };

    let image = TransferImage::new(width as u32, height as u32, pixels)?;
    Ok((image, conversion))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransferError;

    fn decoded(shape: &[usize], samples: Vec<f32>) -> DecodedImage {
        DecodedImage {
            shape: shape.to_vec(),
            samples,
        }
    }

    #[test]
    fn test_rank2_is_replicated() {
        let (img, conv) = normalize(decoded(&[1, 2], vec![0.25, 0.75])).unwrap();
        assert_eq!(conv, Conversion::GrayscaleExpanded);
        assert_eq!(img.pixels(), &[[0.25; 3], [0.75; 3]]);
    }

    #[test]
    fn test_single_channel_is_replicated() {
        let (img, conv) = normalize(decoded(&[2, 1, 1], vec![0.1, 0.9])).unwrap();
        assert_eq!(conv, Conversion::GrayscaleExpanded);
        assert_eq!(img.shape(), [2, 1, 3]);
        assert_eq!(img.pixels()[1], [0.9; 3]);
    }

    #[test]
    fn test_rgb_passes_through() {
        let samples = vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6];
        let (img, conv) = normalize(decoded(&[1, 2, 3], samples)).unwrap();
        assert_eq!(conv, Conversion::Unchanged);
        assert_eq!(img.pixels(), &[[0.1, 0.2, 0.3], [0.4, 0.5, 0.6]]);
    }

    #[test]
    fn test_alpha_is_dropped() {
        let samples = vec![0.1, 0.2, 0.3, 0.0, 0.4, 0.5, 0.6, 1.0];
        let (img, conv) = normalize(decoded(&[2, 1, 4], samples)).unwrap();
        assert_eq!(conv, Conversion::AlphaDropped);
        assert_eq!(img.pixels(), &[[0.1, 0.2, 0.3], [0.4, 0.5, 0.6]]);
    }

    #[test]
    fn test_two_channels_rejected_with_count() {
        let err = normalize(decoded(&[1, 1, 2], vec![0.0, 1.0])).unwrap_err();
        assert!(matches!(
            err,
            TransferError::UnsupportedFormat(FormatIssue::Channels(2))
        ));
        assert!(err.to_string().contains('2'));
    }

    #[test]
    fn test_five_channels_rejected() {
        let err = normalize(decoded(&[1, 1, 5], vec![0.0; 5])).unwrap_err();
        assert!(matches!(
            err,
            TransferError::UnsupportedFormat(FormatIssue::Channels(5))
        ));
    }

    #[test]
    fn test_bad_rank_rejected_with_rank() {
        let err = normalize(decoded(&[4], vec![0.0; 4])).unwrap_err();
        assert!(matches!(
            err,
            TransferError::UnsupportedFormat(FormatIssue::Rank(1))
        ));
        let err = normalize(decoded(&[1, 1, 1, 3], vec![0.0; 3])).unwrap_err();
        assert!(matches!(
            err,
            TransferError::UnsupportedFormat(FormatIssue::Rank(4))
        ));
    }

    #[test]
    fn test_sample_count_mismatch_rejected() {
        let err = normalize(decoded(&[2, 2, 3], vec![0.0; 11])).unwrap_err();
        assert!(matches!(
            err,
            TransferError::UnsupportedFormat(FormatIssue::SampleCount {
                expected: 12,
                actual: 11
            })
        ));
    }

    #[test]
    fn test_from_dynamic_gray_is_rank2() {
        let gray = ::image::GrayImage::from_raw(2, 1, vec![0, 255]).unwrap();
        let decoded = DecodedImage::from_dynamic(&::image::DynamicImage::ImageLuma8(gray));
        assert_eq!(decoded.shape, vec![1, 2]);
        assert_eq!(decoded.samples, vec![0.0, 1.0]);
    }

    #[test]
    fn test_from_dynamic_luma_alpha_is_rejected() {
        let la = ::image::GrayAlphaImage::from_raw(1, 1, vec![128, 255]).unwrap();
        let decoded = DecodedImage::from_dynamic(&::image::DynamicImage::ImageLumaA8(la));
        assert_eq!(decoded.shape, vec![1, 1, 2]);
        assert!(normalize(decoded).is_err());
    }

    #[test]
    fn test_from_dynamic_rgba_drops_alpha() {
        let rgba = ::image::RgbaImage::from_raw(1, 1, vec![255, 0, 51, 10]).unwrap();
        let decoded = DecodedImage::from_dynamic(&::image::DynamicImage::ImageRgba8(rgba));
        let (img, conv) = normalize(decoded).unwrap();
        assert_eq!(conv, Conversion::AlphaDropped);
        let px = img.pixels()[0];
        assert!((px[0] - 1.0).abs() < 1e-6);
        assert!(px[1].abs() < 1e-6);
        assert!((px[2] - 0.2).abs() < 1e-6);
    }
}
