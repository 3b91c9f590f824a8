//! Intensity blending between the original and the styled image.

use crate::error::Result;
use crate::image::TransferImage;

/// Clamp a caller-supplied intensity to `[0, 1]`. NaN counts as 0.
pub fn clamp_intensity(intensity: f32) -> f32 {
    if intensity.is_nan() {
        return 0.0;
    }
    intensity.clamp(0.0, 1.0)
}

/// `original × (1 − t) + styled × t` with `t = clamp(intensity, 0, 1)`.
///
/// The result is clamped to `[0, 1]` in case an upstream stage overshot.
/// At `t = 0` and `t = 1` the output reproduces the corresponding input
/// exactly.
pub fn blend(original: &TransferImage, styled: &TransferImage, intensity: f32) -> Result<TransferImage> {
    original.ensure_same_shape(styled)?;

    let t = clamp_intensity(intensity);
    let keep = 1.0 - t;

    let pixels = original
        .pixels()
        .iter()
        .zip(styled.pixels())
        .map(|(o, s)| std::array::from_fn(|c| (o[c] * keep + s[c] * t).clamp(0.0, 1.0)))
        .collect();

    TransferImage::new(original.width(), original.height(), pixels)
}
