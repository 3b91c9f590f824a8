//! Per-channel histogram matching.
//!
//! Remaps each source channel so its empirical CDF follows the reference
//! channel's empirical CDF.
//!
//! # Algorithm
//! 1. Collapse the source into sorted unique values with counts, keeping
//!    each sample's index into the unique list
//! 2. Collapse the reference the same way
//! 3. Turn both count lists into cumulative quantiles `cumsum(counts) / n`
//! 4. For every unique source quantile, interpolate linearly over
//!    (reference quantiles → reference values)
//! 5. Scatter the mapped values back through the source index
//!
//! Equal source values share one unique entry, so ties always receive the
//! same output. Outputs never leave the reference's value range.
//!
//! # Complexity
//! O(N log N) for the sorts, O(U log V) for the interpolation.

use crate::error::Result;
use crate::image::{CHANNELS, TransferImage};

/// Match every channel of `source` to the same channel of `reference`.
///
/// Both images must already share a shape.
pub fn match_histograms(source: &TransferImage, reference: &TransferImage) -> Result<TransferImage> {
    source.ensure_same_shape(reference)?;

    let channels: [Vec<f32>; CHANNELS] = std::array::from_fn(|c| {
        match_channel(&source.channel(c), &reference.channel(c))
    });
    TransferImage::from_channels(source.width(), source.height(), channels)
}

/// Match one planar channel against a reference channel.
///
/// Returns `source` unchanged when either side is empty.
pub fn match_channel(source: &[f32], reference: &[f32]) -> Vec<f32> {
    if source.is_empty() || reference.is_empty() {
        return source.to_vec();
    }

    let src = UniqueValues::with_inverse(source);
    let tmpl = UniqueValues::with_inverse(reference);

    let src_quantiles = cumulative_quantiles(&src.counts, source.len());
    let tmpl_quantiles = cumulative_quantiles(&tmpl.counts, reference.len());

    let mapped: Vec<f32> = src_quantiles
        .iter()
        .map(|&q| interpolate(q, &tmpl_quantiles, &tmpl.values))
        .collect();

    src.inverse.iter().map(|&i| mapped[i]).collect()
}

/// Sorted distinct values of a sample set, with multiplicities.
struct UniqueValues {
    values: Vec<f32>,
    counts: Vec<usize>,
    /// For each input sample, its index into `values`.
    inverse: Vec<usize>,
}

impl UniqueValues {
    fn with_inverse(samples: &[f32]) -> Self {
        let mut order: Vec<usize> = (0..samples.len()).collect();
        order.sort_unstable_by(|&a, &b| samples[a].total_cmp(&samples[b]));

        let mut values: Vec<f32> = Vec::new();
        let mut counts: Vec<usize> = Vec::new();
        let mut inverse = vec![0usize; samples.len()];

        for &idx in &order {
            let v = samples[idx];
            match values.last() {
                Some(&last) if last.total_cmp(&v).is_eq() => {
                    if let Some(count) = counts.last_mut() {
                        *count += 1;
                    }
                }
                _ => {
                    values.push(v);
                    counts.push(1);
                }
            }
            inverse[idx] = values.len() - 1;
        }

        Self {
            values,
            counts,
            inverse,
        }
    }
}

/// `cumsum(counts) / total`, accumulated in f64.
fn cumulative_quantiles(counts: &[usize], total: usize) -> Vec<f64> {
    let total = total as f64;
    let mut running = 0usize;
    counts
        .iter()
        .map(|&c| {
            running += c;
            running as f64 / total
        })
        .collect()
}

/// Piecewise-linear interpolation of `fp` over increasing knots `xp`.
///
/// Clamps to the first/last value outside the knot range. A query landing
/// exactly on a knot returns that knot's value unchanged.
fn interpolate(x: f64, xp: &[f64], fp: &[f32]) -> f32 {
    let last = xp.len() - 1;
    if x <= xp[0] {
        return fp[0];
    }
    if x >= xp[last] {
        return fp[last];
    }

    // First knot at or above x; guaranteed in 1..=last by the checks above.
    let hi = xp.partition_point(|&p| p < x);
    if xp[hi] == x {
        return fp[hi];
    }
    let lo = hi - 1;
    let t = (x - xp[lo]) / (xp[hi] - xp[lo]);
    (fp[lo] as f64 + (fp[hi] as f64 - fp[lo] as f64) * t) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_match_to_self_is_identity() {
        let data = [0.3, 0.1, 0.9, 0.1, 0.5, 0.7, 0.3, 0.0];
        let out = match_channel(&data, &data);
        assert_eq!(out, data);
    }

    #[test]
    fn test_ties_share_output() {
        let source = [0.5, 0.2, 0.5, 0.5, 0.9];
        let reference = [0.0, 0.25, 0.5, 0.75, 1.0];
        let out = match_channel(&source, &reference);
        assert_eq!(out[0], out[2]);
        assert_eq!(out[2], out[3]);
    }

    #[test]
    fn test_output_bounded_by_reference_range() {
        let source: Vec<f32> = (0..50).map(|i| i as f32 / 49.0).collect();
        let reference: Vec<f32> = (0..30).map(|i| 0.4 + 0.2 * (i as f32 / 29.0)).collect();
        let out = match_channel(&source, &reference);
        for v in out {
            assert!((0.4 - EPSILON..=0.6 + EPSILON).contains(&v), "{v}");
        }
    }

    #[test]
    fn test_order_is_preserved() {
        let source = [0.9, 0.1, 0.5, 0.3, 0.7];
        let reference = [0.2, 0.4, 0.6, 0.8, 1.0];
        let out = match_channel(&source, &reference);
        // Same ranks, distinct values: each source rank takes the reference
        // value at that rank.
        assert_eq!(out, vec![1.0, 0.2, 0.6, 0.4, 0.8]);
    }

    #[test]
    fn test_constant_source_takes_reference_maximum() {
        // A single unique source value sits at quantile 1.0.
        let source = [0.2; 4];
        let reference = [0.1, 0.3, 0.5, 0.8];
        let out = match_channel(&source, &reference);
        assert_eq!(out, vec![0.8; 4]);
    }

    #[test]
    fn test_interpolates_between_reference_quantiles() {
        // Source quantiles 0.5 and 1.0; reference quantiles 0.25 .. 1.0.
        let source = [0.0, 1.0];
        let reference = [0.0, 0.2, 0.4, 0.6];
        let out = match_channel(&source, &reference);
        assert!((out[0] - 0.2).abs() < EPSILON);
        assert!((out[1] - 0.6).abs() < EPSILON);

        // Source quantiles 1/3, 2/3, 1 land between reference knots.
        let source = [0.1, 0.2, 0.3];
        let out = match_channel(&source, &reference);
        let expected_first = 0.0 + (0.2 - 0.0) * ((1.0 / 3.0 - 0.25) / 0.25);
        assert!((out[0] - expected_first as f32).abs() < EPSILON);
    }

    #[test]
    fn test_empty_inputs_pass_through() {
        assert!(match_channel(&[], &[0.5]).is_empty());
        assert_eq!(match_channel(&[0.5], &[]), vec![0.5]);
    }

    #[test]
    fn test_multichannel_channels_are_independent() {
        let source = TransferImage::from_fn(4, 4, |x, y| {
            [x as f32 / 3.0, y as f32 / 3.0, 0.5]
        })
        .unwrap();
        let reference = TransferImage::from_fn(4, 4, |x, y| {
            [0.5 + x as f32 / 6.0, 0.25, y as f32 / 3.0]
        })
        .unwrap();
        let out = match_histograms(&source, &reference).unwrap();
        assert_eq!(out.channel(0), match_channel(&source.channel(0), &reference.channel(0)));
        assert_eq!(out.channel(1), match_channel(&source.channel(1), &reference.channel(1)));
        assert_eq!(out.channel(2), match_channel(&source.channel(2), &reference.channel(2)));
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let a = TransferImage::filled(2, 2, [0.5; 3]).unwrap();
        let b = TransferImage::filled(3, 2, [0.5; 3]).unwrap();
        assert!(match_histograms(&a, &b).is_err());
    }
}
