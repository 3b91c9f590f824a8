//! Transfer method identifiers.
//!
//! Methods are named by stable string identifiers (`"histogram"`,
//! `"lut_scurve"`, ...). Parsing never fails: an identifier nobody knows
//! becomes [`TransferMethod::Unrecognized`], which runs the histogram
//! pipeline and logs a warning.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::transfer::region::Region;
use crate::transfer::tone_curve::ToneCurve;

/// Selects one of the eight transfer algorithms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransferMethod {
    /// Per-channel histogram matching.
    #[default]
    Histogram,
    /// Per-channel mean and standard deviation transfer.
    MeanStd,
    /// Histogram matching followed by the linear tone curve.
    LutLinear,
    /// Histogram matching followed by the S-curve.
    LutSCurve,
    /// Histogram matching followed by the contrast curve.
    LutContrast,
    /// Histogram matching restricted to the shadows.
    SelectiveShadows,
    /// Histogram matching restricted to the midtones.
    SelectiveMidtones,
    /// Histogram matching restricted to the highlights.
    SelectiveHighlights,
    /// Identifier that matched no known method. Runs as [`Self::Histogram`].
    Unrecognized(String),
}

/// The stage composition a method stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pipeline {
    Histogram,
    MeanStd,
    /// Histogram matching, then a tone curve.
    Curve(ToneCurve),
    /// Histogram matching, then compositing inside a luminance band.
    Selective(Region),
}

impl TransferMethod {
    /// Built-in methods in menu order.
    pub fn all() -> &'static [Self] {
        static ALL: [TransferMethod; 8] = [
            TransferMethod::Histogram,
            TransferMethod::MeanStd,
            TransferMethod::LutLinear,
            TransferMethod::LutSCurve,
            TransferMethod::LutContrast,
            TransferMethod::SelectiveShadows,
            TransferMethod::SelectiveMidtones,
            TransferMethod::SelectiveHighlights,
        ];
        &ALL
    }

    /// Stable identifier, as accepted by [`FromStr`].
    pub fn id(&self) -> &str {
        match self {
            Self::Histogram => "histogram",
            Self::MeanStd => "meanstd",
            Self::LutLinear => "lut_linear",
            Self::LutSCurve => "lut_scurve",
            Self::LutContrast => "lut_contrast",
            Self::SelectiveShadows => "selective_shadows",
            Self::SelectiveMidtones => "selective_midtones",
            Self::SelectiveHighlights => "selective_highlights",
            Self::Unrecognized(id) => id.as_str(),
        }
    }

    /// Human-readable label for UI menus and status text.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Histogram => "Histogram Matching",
            Self::MeanStd => "Mean/Std Transfer",
            Self::LutLinear => "LUT + Linear Curve",
            Self::LutSCurve => "LUT + S-Curve",
            Self::LutContrast => "LUT + Contrast",
            Self::SelectiveShadows => "Selective: Shadows",
            Self::SelectiveMidtones => "Selective: Midtones",
            Self::SelectiveHighlights => "Selective: Highlights",
            Self::Unrecognized(_) => "Histogram Matching (fallback)",
        }
    }

    /// The stages this method runs.
    pub fn pipeline(&self) -> Pipeline {
        match self {
            Self::Histogram | Self::Unrecognized(_) => Pipeline::Histogram,
            Self::MeanStd => Pipeline::MeanStd,
            Self::LutLinear => Pipeline::Curve(ToneCurve::Linear),
            Self::LutSCurve => Pipeline::Curve(ToneCurve::SCurve),
            Self::LutContrast => Pipeline::Curve(ToneCurve::Contrast),
            Self::SelectiveShadows => Pipeline::Selective(Region::Shadows),
            Self::SelectiveMidtones => Pipeline::Selective(Region::Midtones),
            Self::SelectiveHighlights => Pipeline::Selective(Region::Highlights),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl FromStr for TransferMethod {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim();
        Ok(Self::all()
            .iter()
            .find(|m| m.id() == id)
            .cloned()
            .unwrap_or_else(|| Self::Unrecognized(id.to_string())))
    }
}

impl From<String> for TransferMethod {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(method) => method,
            Err(never) => match never {},
        }
    }
}

impl From<TransferMethod> for String {
    fn from(method: TransferMethod) -> Self {
        method.id().to_string()
    }
}

impl fmt::Display for TransferMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
