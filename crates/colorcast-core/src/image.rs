//! Image representation for the transfer pipeline.

use std::fmt;

use crate::error::{FormatIssue, Result, TransferError};

/// Number of color channels every normalized image carries.
pub const CHANNELS: usize = 3;

/// Canonical engine image. Always RGB f32, samples nominally in `[0, 1]`.
///
/// Pixels are stored row-major. Once built an image is never mutated; every
/// stage returns a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferImage {
    width: u32,
    height: u32,
    pixels: Vec<[f32; 3]>,
}

impl TransferImage {
    /// Wrap a pixel buffer, checking it matches `width × height`.
    pub fn new(width: u32, height: u32, pixels: Vec<[f32; 3]>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if expected == 0 {
            return Err(FormatIssue::Empty.into());
        }
        if pixels.len() != expected {
            return Err(FormatIssue::SampleCount {
                expected: expected * CHANNELS,
                actual: pixels.len() * CHANNELS,
            }
            .into());
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Image where every pixel has the same value.
    pub fn filled(width: u32, height: u32, rgb: [f32; 3]) -> Result<Self> {
        Self::new(width, height, vec![rgb; width as usize * height as usize])
    }

    /// Build an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> [f32; 3]) -> Result<Self> {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self::new(width, height, pixels)
    }

    /// Reassemble an image from three planar channels of equal length.
    pub fn from_channels(width: u32, height: u32, channels: [Vec<f32>; 3]) -> Result<Self> {
        let [r, g, b] = channels;
        let pixels = r
            .into_iter()
            .zip(g)
            .zip(b)
            .map(|((r, g), b)| [r, g, b])
            .collect();
        Self::new(width, height, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major pixel buffer.
    pub fn pixels(&self) -> &[[f32; 3]] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<[f32; 3]> {
        self.pixels
    }

    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// `[height, width, channels]`, the order the transfer contracts use.
    pub fn shape(&self) -> [usize; 3] {
        [self.height as usize, self.width as usize, CHANNELS]
    }

    /// Copy one channel out as a planar buffer.
    pub fn channel(&self, c: usize) -> Vec<f32> {
        self.pixels.iter().map(|px| px[c]).collect()
    }

    /// Apply `f` to every sample, keeping dimensions.
    pub fn map_samples(&self, mut f: impl FnMut(f32) -> f32) -> Self {
        Self {
            width: self.width,
            height: self.height,
            pixels: self
                .pixels
                .iter()
                .map(|px| [f(px[0]), f(px[1]), f(px[2])])
                .collect(),
        }
    }

    /// Fail with `ShapeMismatch` unless `other` has the same shape as `self`.
    pub fn ensure_same_shape(&self, other: &Self) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(TransferError::ShapeMismatch {
                expected: self.shape(),
                actual: other.shape(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for TransferImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} RGB", self.width, self.height)
    }
}
