//! Statistical (mean / standard deviation) color transfer.
//!
//! For each channel:
//! ```text
//! out = (src − mean(src)) × std(ref) / (std(src) + ε) + mean(ref)
//! ```
//! then clamped to `[0, 1]`. Standard deviations are population (divide by
//! N). ε keeps constant channels finite.

use crate::error::Result;
use crate::image::TransferImage;

/// Guards the division for flat source channels.
pub const STD_EPSILON: f64 = 1e-8;

/// Per-channel first and second moments of an image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelStats {
    pub mean: [f64; 3],
    pub stddev: [f64; 3],
}

impl ChannelStats {
    /// Compute mean and population standard deviation per channel.
    ///
    /// Two passes, so a constant channel yields exactly zero deviation.
    pub fn compute(image: &TransferImage) -> Self {
        let n = image.pixel_count() as f64;

        let mut sum = [0.0_f64; 3];
        for px in image.pixels() {
            for c in 0..3 {
                sum[c] += px[c] as f64;
            }
        }
        let mean = sum.map(|s| s / n);

        let mut sum_sq = [0.0_f64; 3];
        for px in image.pixels() {
            for c in 0..3 {
                let d = px[c] as f64 - mean[c];
                sum_sq[c] += d * d;
            }
        }
        let stddev = sum_sq.map(|s| (s / n).sqrt());

        Self { mean, stddev }
    }
}

/// Shift and scale every channel of `source` to the reference's statistics.
pub fn transfer_mean_std(source: &TransferImage, reference: &TransferImage) -> Result<TransferImage> {
    source.ensure_same_shape(reference)?;

    let src = ChannelStats::compute(source);
    let tmpl = ChannelStats::compute(reference);

    let scale: [f64; 3] = std::array::from_fn(|c| tmpl.stddev[c] / (src.stddev[c] + STD_EPSILON));

    let pixels = source
        .pixels()
        .iter()
        .map(|px| {
            std::array::from_fn(|c| {
                let v = (px[c] as f64 - src.mean[c]) * scale[c] + tmpl.mean[c];
                v.clamp(0.0, 1.0) as f32
            })
        })
        .collect();

    TransferImage::new(source.width(), source.height(), pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_stats_of_constant_image() {
        let img = TransferImage::filled(3, 3, [0.2, 0.4, 0.6]).unwrap();
        let stats = ChannelStats::compute(&img);
        for c in 0..3 {
            assert_eq!(stats.stddev[c], 0.0);
        }
        assert!((stats.mean[1] - 0.4).abs() < 1e-7);
    }

    #[test]
    fn test_stats_population_stddev() {
        // Values 0 and 1 in equal share: mean 0.5, population std 0.5.
        let img = TransferImage::from_fn(2, 2, |x, _| [x as f32; 3]).unwrap();
        let stats = ChannelStats::compute(&img);
        assert!((stats.mean[0] - 0.5).abs() < 1e-12);
        assert!((stats.stddev[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_constant_to_constant_takes_reference_mean() {
        let content = TransferImage::filled(2, 2, [0.2; 3]).unwrap();
        let style = TransferImage::filled(2, 2, [0.8; 3]).unwrap();
        let out = transfer_mean_std(&content, &style).unwrap();
        for px in out.pixels() {
            for v in px {
                assert!((v - 0.8).abs() < EPSILON);
            }
        }
    }

    #[test]
    fn test_output_matches_reference_moments() {
        let content = TransferImage::from_fn(8, 8, |x, y| {
            [0.3 + 0.02 * x as f32, 0.4 + 0.01 * y as f32, 0.5]
        })
        .unwrap();
        let style = TransferImage::from_fn(8, 8, |x, y| {
            [0.4 + 0.04 * y as f32, 0.2 + 0.03 * x as f32, 0.1 + 0.01 * x as f32]
        })
        .unwrap();
        let out = transfer_mean_std(&content, &style).unwrap();
        let got = ChannelStats::compute(&out);
        let want = ChannelStats::compute(&style);
        for c in 0..2 {
            assert!((got.mean[c] - want.mean[c]).abs() < 1e-5, "mean ch{c}");
            assert!((got.stddev[c] - want.stddev[c]).abs() < 1e-5, "std ch{c}");
        }
        // Flat source channel collapses onto the reference mean.
        for px in out.pixels() {
            assert!((px[2] as f64 - want.mean[2]).abs() < 1e-5);
        }
    }

    #[test]
    fn test_overshoot_is_clamped() {
        let content = TransferImage::from_fn(4, 1, |x, _| [x as f32 * 0.01; 3]).unwrap();
        let style = TransferImage::from_fn(4, 1, |x, _| [if x % 2 == 0 { 0.0 } else { 1.0 }; 3]).unwrap();
        let out = transfer_mean_std(&content, &style).unwrap();
        for px in out.pixels() {
            for v in px {
                assert!((0.0..=1.0).contains(v));
            }
        }
    }
}
