//! Transfer dispatcher: composes the stages a method names.
//!
//! ```text
//! content ─┐
//!          ├─ reconcile ─ pipeline(method) ─ styled ─ blend(intensity) ─ result
//! style  ──┘
//! ```
//!
//! The engine keeps no state between calls; the same inputs always produce
//! the same output.

use std::time::Instant;

use crate::config::TransferConfig;
use crate::error::Result;
use crate::image::TransferImage;
use crate::transfer::blend::blend;
use crate::transfer::histogram::match_histograms;
use crate::transfer::method::{Pipeline, TransferMethod};
use crate::transfer::reconcile::reconcile;
use crate::transfer::statistics::transfer_mean_std;

/// Runs transfer methods with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct TransferEngine {
    config: TransferConfig,
}

impl TransferEngine {
    /// Create an engine, rejecting configs with an invalid threshold pair.
    pub fn new(config: TransferConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TransferConfig {
        &self.config
    }

    /// Run `method` at full strength: the styled image before blending.
    ///
    /// `style` is resized to `content`'s dimensions first if they differ.
    pub fn stylize(
        &self,
        content: &TransferImage,
        style: &TransferImage,
        method: &TransferMethod,
    ) -> Result<TransferImage> {
        if let TransferMethod::Unrecognized(id) = method {
            tracing::warn!("unknown transfer method {id:?}, falling back to histogram matching");
        }

        let started = Instant::now();
        let reference = reconcile(content, style, self.config.resample_filter)?;

        let styled = match method.pipeline() {
            Pipeline::Histogram => match_histograms(content, &reference)?,
            Pipeline::MeanStd => transfer_mean_std(content, &reference)?,
            Pipeline::Curve(curve) => {
                let matched = match_histograms(content, &reference)?;
                curve.apply_image(&matched)
            }
            Pipeline::Selective(region) => {
                let matched = match_histograms(content, &reference)?;
                let mask = region.mask(content, &self.config.thresholds);
                tracing::debug!(
                    "{} mask selects {}/{} pixels",
                    region.label(),
                    mask.count(),
                    content.pixel_count()
                );
                mask.composite(content, &matched)?
            }
        };

        tracing::debug!(
            "{} on {content} in {:.1?}",
            method.label(),
            started.elapsed()
        );
        Ok(styled)
    }

    /// Blend a previously styled image back over the content.
    pub fn blend(
        &self,
        content: &TransferImage,
        styled: &TransferImage,
        intensity: f32,
    ) -> Result<TransferImage> {
        blend(content, styled, intensity)
    }

    /// Stylize and blend in one call.
    pub fn transfer(
        &self,
        content: &TransferImage,
        style: &TransferImage,
        method: &TransferMethod,
        intensity: f32,
    ) -> Result<TransferImage> {
        let styled = self.stylize(content, style, method)?;
        self.blend(content, &styled, intensity)
    }
}

/// [`TransferEngine::transfer`] with the default configuration.
pub fn transfer(
    content: &TransferImage,
    style: &TransferImage,
    method: &TransferMethod,
    intensity: f32,
) -> Result<TransferImage> {
    TransferEngine::default().transfer(content, style, method, intensity)
}
