//! Engine settings.
//!
//! `TransferConfig` is everything the engine reads besides the two images,
//! the method, and the intensity. The defaults reproduce the reference
//! behavior; a JSON file may override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TransferError};

/// Default upper bound of the shadow band (exclusive).
pub const DEFAULT_SHADOW_THRESHOLD: f32 = 0.3;
/// Default lower bound of the highlight band (exclusive).
pub const DEFAULT_HIGHLIGHT_THRESHOLD: f32 = 0.7;

/// Luminance thresholds partitioning `[0, 1]` into shadows, midtones, and
/// highlights.
///
/// Shadows are `[0, shadow)`, midtones `[shadow, highlight]`, highlights
/// `(highlight, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub shadow: f32,
    pub highlight: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            shadow: DEFAULT_SHADOW_THRESHOLD,
            highlight: DEFAULT_HIGHLIGHT_THRESHOLD,
        }
    }
}

/// Continuous resampling filter used when reconciling image shapes.
///
/// All variants are antialiased on downscale; the output is clamped to the
/// input range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResampleFilter {
    /// Bilinear tent. Non-negative kernel, never rings.
    #[default]
    Triangle,
    /// Cubic Catmull-Rom.
    CatmullRom,
    /// Gaussian, sigma 0.5.
    Gaussian,
    /// Lanczos with window 3.
    Lanczos3,
}

impl ResampleFilter {
    /// Human-readable label for status text.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Triangle => "Triangle",
            Self::CatmullRom => "Catmull-Rom",
            Self::Gaussian => "Gaussian",
            Self::Lanczos3 => "Lanczos3",
        }
    }

    pub(crate) fn to_filter_type(self) -> ::image::imageops::FilterType {
        use ::image::imageops::FilterType;
        match self {
            Self::Triangle => FilterType::Triangle,
            Self::CatmullRom => FilterType::CatmullRom,
            Self::Gaussian => FilterType::Gaussian,
            Self::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Configuration for a [`TransferEngine`](crate::TransferEngine).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
    /// Band limits for the selective methods.
    pub thresholds: Thresholds,
    /// Filter used to resize the style image to the content's dimensions.
    pub resample_filter: ResampleFilter,
}

impl TransferConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| TransferError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            TransferError::InvalidConfig(format!("{}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    /// Check the thresholds describe a valid partition of `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        let Thresholds { shadow, highlight } = self.thresholds;
        if !shadow.is_finite() || !highlight.is_finite() {
            return Err(TransferError::InvalidConfig(
                "thresholds must be finite".to_string(),
            ));
        }
        if shadow > highlight {
            return Err(TransferError::InvalidConfig(format!(
                "shadow threshold {shadow} exceeds highlight threshold {highlight}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let config = TransferConfig::default();
        assert_eq!(config.thresholds.shadow, 0.3);
        assert_eq!(config.thresholds.highlight, 0.7);
        assert_eq!(config.resample_filter, ResampleFilter::Triangle);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = TransferConfig::from_json(r#"{ "thresholds": { "shadow": 0.25 } }"#).unwrap();
        assert_eq!(config.thresholds.shadow, 0.25);
        assert_eq!(config.thresholds.highlight, 0.7);
        assert_eq!(config.resample_filter, ResampleFilter::Triangle);
    }

    #[test]
    fn test_filter_parses_snake_case() {
        let config = TransferConfig::from_json(r#"{ "resample_filter": "catmull_rom" }"#).unwrap();
        assert_eq!(config.resample_filter, ResampleFilter::CatmullRom);
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let err = TransferConfig::from_json(
            r#"{ "thresholds": { "shadow": 0.8, "highlight": 0.2 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, TransferError::InvalidConfig(_)));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = TransferConfig::from_json("{ thresholds: ").unwrap_err();
        assert!(matches!(err, TransferError::InvalidConfig(_)));
    }

    #[test]
    fn test_config_roundtrips_through_json() {
        let config = TransferConfig {
            thresholds: Thresholds {
                shadow: 0.2,
                highlight: 0.9,
            },
            resample_filter: ResampleFilter::Lanczos3,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(TransferConfig::from_json(&json).unwrap(), config);
    }
}
