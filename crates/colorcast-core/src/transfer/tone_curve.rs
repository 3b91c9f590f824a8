//! Tone curves applied after histogram matching in the LUT methods.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use crate::image::TransferImage;

/// Exponent of the contrast curve. Below 1, so shadows lift.
const CONTRAST_GAMMA: f32 = 0.8;

/// Elementwise remapping of normalized values.
///
/// Each curve is monotonic on `[0, 1]` and maps the range onto itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneCurve {
    /// `v`
    Linear,
    /// `0.5 + 0.5 × sin(π × (v − 0.5))`. Steeper midtones, fixed points at
    /// 0, 0.5 and 1.
    SCurve,
    /// `v^0.8`
    Contrast,
}

impl ToneCurve {
    /// Human-readable label for UI menus and status text.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Linear => "Linear",
            Self::SCurve => "S-Curve",
            Self::Contrast => "Contrast",
        }
    }

    /// Evaluate the curve at `v`.
    pub fn apply(&self, v: f32) -> f32 {
        match self {
            Self::Linear => v,
            Self::SCurve => 0.5 + 0.5 * (PI * (v - 0.5)).sin(),
            // Negative bases would produce NaN; matched values never go below 0.
            Self::Contrast => v.max(0.0).powf(CONTRAST_GAMMA),
        }
    }

    /// Apply the curve to every sample and clamp to `[0, 1]`.
    pub fn apply_image(&self, image: &TransferImage) -> TransferImage {
        image.map_samples(|v| self.apply(v).clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_linear_is_identity() {
        for i in 0..=10 {
            let v = i as f32 / 10.0;
            assert_eq!(ToneCurve::Linear.apply(v), v);
        }
    }

    #[test]
    fn test_s_curve_fixed_points() {
        assert!(ToneCurve::SCurve.apply(0.0).abs() < EPSILON);
        assert!((ToneCurve::SCurve.apply(0.5) - 0.5).abs() < EPSILON);
        assert!((ToneCurve::SCurve.apply(1.0) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_s_curve_steepens_midtones() {
        // Below the midpoint values darken, above they brighten.
        assert!(ToneCurve::SCurve.apply(0.3) < 0.3);
        assert!(ToneCurve::SCurve.apply(0.7) > 0.7);
    }

    #[test]
    fn test_contrast_lifts_shadows() {
        let v = 0.25;
        let out = ToneCurve::Contrast.apply(v);
        assert!(out > v);
        assert!((out - 0.25_f32.powf(0.8)).abs() < EPSILON);
        assert_eq!(ToneCurve::Contrast.apply(0.0), 0.0);
        assert_eq!(ToneCurve::Contrast.apply(1.0), 1.0);
    }

    #[test]
    fn test_curves_are_monotonic() {
        for curve in [ToneCurve::Linear, ToneCurve::SCurve, ToneCurve::Contrast] {
            let mut prev = curve.apply(0.0);
            for i in 1..=100 {
                let next = curve.apply(i as f32 / 100.0);
                assert!(next >= prev, "{curve:?} decreased at step {i}");
                prev = next;
            }
        }
    }

    #[test]
    fn test_apply_image_stays_in_range() {
        let img = TransferImage::from_fn(11, 1, |x, _| [x as f32 / 10.0; 3]).unwrap();
        for curve in [ToneCurve::Linear, ToneCurve::SCurve, ToneCurve::Contrast] {
            let out = curve.apply_image(&img);
            for px in out.pixels() {
                assert!((0.0..=1.0).contains(&px[0]));
            }
        }
    }
}
