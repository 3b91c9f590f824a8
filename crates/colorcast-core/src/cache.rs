//! Optional memoization of the last styled image.
//!
//! Changing only the intensity does not need a new stylize pass; a shell
//! can keep a [`StyledCache`] next to the engine and re-blend from the
//! cached result. The engine never consults the cache itself, so results
//! are identical with or without it.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Result;
use crate::image::TransferImage;
use crate::transfer::dispatch::TransferEngine;
use crate::transfer::method::TransferMethod;

/// Hash of an image's dimensions and exact sample bits.
pub fn fingerprint(image: &TransferImage) -> u64 {
    let mut hasher = DefaultHasher::new();
    image.width().hash(&mut hasher);
    image.height().hash(&mut hasher);
    for px in image.pixels() {
        for v in px {
            v.to_bits().hash(&mut hasher);
        }
    }
    hasher.finish()
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CacheKey {
    content: u64,
    style: u64,
    method: TransferMethod,
}

/// Single-entry cache of the most recent styled image.
#[derive(Debug, Default)]
pub struct StyledCache {
    entry: Mutex<Option<(CacheKey, Arc<TransferImage>)>>,
}

impl StyledCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the styled image for these inputs, computing it on a miss.
    pub fn get_or_stylize(
        &self,
        engine: &TransferEngine,
        content: &TransferImage,
        style: &TransferImage,
        method: &TransferMethod,
    ) -> Result<Arc<TransferImage>> {
        let key = CacheKey {
            content: fingerprint(content),
            style: fingerprint(style),
            method: method.clone(),
        };

        if let Some((cached_key, styled)) = self.entry.lock().as_ref()
            && *cached_key == key
        {
            tracing::debug!("styled cache hit for {}", method.label());
            return Ok(Arc::clone(styled));
        }

        // Computed outside the lock; a concurrent miss just stylizes twice.
        let styled = Arc::new(engine.stylize(content, style, method)?);
        *self.entry.lock() = Some((key, Arc::clone(&styled)));
        Ok(styled)
    }

    /// Drop the cached entry, e.g. when new images are loaded.
    pub fn clear(&self) {
        *self.entry.lock() = None;
    }

    pub fn is_empty(&self) -> bool {
        self.entry.lock().is_none()
    }
}
