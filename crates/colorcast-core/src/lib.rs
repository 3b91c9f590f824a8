//! ColorCast Core: color transfer engine.
//!
//! Moves the color distribution of a content image toward a style image.
//! Every stage is a pure function from input buffers to a freshly allocated
//! output buffer; nothing here owns mutable state except the optional
//! [`StyledCache`].

pub mod cache;
pub mod config;
pub mod error;
pub mod image;
pub mod io;
pub mod normalize;
pub mod transfer;

// Re-exports for convenience.
pub use crate::cache::StyledCache;
pub use crate::config::{ResampleFilter, Thresholds, TransferConfig};
pub use crate::error::{FormatIssue, ImageIoError, Result, TransferError};
pub use crate::image::TransferImage;
pub use crate::io::{load, load_with_report, save};
pub use crate::normalize::{Conversion, DecodedImage};
pub use crate::transfer::dispatch::{TransferEngine, transfer};
pub use crate::transfer::method::TransferMethod;
pub use crate::transfer::region::Region;
pub use crate::transfer::tone_curve::ToneCurve;
