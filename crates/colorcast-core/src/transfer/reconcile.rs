//! Shape reconciliation: resizes the reference to the content's dimensions.
//!
//! Only the reference is ever resized; the content image defines the output
//! geometry. Resampling is continuous and antialiased so the per-channel
//! statistics of the reference survive the resize.

use std::borrow::Cow;

use crate::config::ResampleFilter;
use crate::error::{FormatIssue, Result};
use crate::image::TransferImage;

/// Return `reference` resized to `content`'s width and height.
///
/// Borrows the reference unchanged when the shapes already match.
pub fn reconcile<'a>(
    content: &TransferImage,
    reference: &'a TransferImage,
    filter: ResampleFilter,
) -> Result<Cow<'a, TransferImage>> {
    if content.shape() == reference.shape() {
        return Ok(Cow::Borrowed(reference));
    }

    tracing::debug!(
        "resizing style image from {:?} to {:?} ({})",
        reference.shape(),
        content.shape(),
        filter.label()
    );
    resize(reference, content.width(), content.height(), filter).map(Cow::Owned)
}

/// Resample `image` to `width × height` with the given filter.
///
/// Output samples are clamped to `[0, 1]`.
pub fn resize(
    image: &TransferImage,
    width: u32,
    height: u32,
    filter: ResampleFilter,
) -> Result<TransferImage> {
    let raw: Vec<f32> = image.pixels().iter().flatten().copied().collect();
    let actual = raw.len();
    let buffer = ::image::Rgb32FImage::from_raw(image.width(), image.height(), raw).ok_or(
        FormatIssue::SampleCount {
            expected: image.pixel_count() * 3,
            actual,
        },
    )?;

    let resized = ::image::imageops::resize(&buffer, width, height, filter.to_filter_type());
    let pixels = resized
        .into_raw()
        .chunks_exact(3)
        .map(|px| {
            [
                px[0].clamp(0.0, 1.0),
                px[1].clamp(0.0, 1.0),
                px[2].clamp(0.0, 1.0),
            ]
        })
        .collect();

    TransferImage::new(width, height, pixels)
}
