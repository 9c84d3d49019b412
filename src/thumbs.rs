//! Memoized thumbnail generation for gallery grids.
//!
//! Thumbnails are deterministic: center-crop to the target dimensions, then
//! a safety resize to exactly that size (the crop alone can come up short
//! when the source is smaller than the crop window), encoded as PNG. Always
//! PNG regardless of source format — a little larger, but universally
//! lossless and alpha-capable for previews.
//!
//! # Memoization
//!
//! One entry per key. The first request for a key decodes and encodes; every
//! subsequent request returns the stored entry without touching the codec.
//! Entries are never updated in place; [`ThumbnailCache::clear`] empties the
//! whole map. There is deliberately no eviction — the cache is unbounded for
//! the session's lifetime.
//!
//! # Keys
//!
//! Callers may use any stable string. [`content_key`] offers the
//! content-addressed choice: a SHA-256 of the source bytes, so renaming a
//! file never invalidates its thumbnail and identical bytes share one entry.
//!
//! # Concurrency
//!
//! The map is mutex-guarded and generation happens outside the lock, so
//! parallel batch generation can share one cache. Two threads racing on the
//! same cold key may both generate, but the first insert wins and both get
//! the same stored entry — at most one entry per key, always.

use crate::format::OutputFormat;
use crate::imaging::{CodecError, ImageCodec, Quality, transform};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Default thumbnail dimensions for grid display.
pub const DEFAULT_THUMB_WIDTH: u32 = 140;
pub const DEFAULT_THUMB_HEIGHT: u32 = 120;

/// A generated thumbnail. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailEntry {
    pub key: String,
    /// Display filename for the grid, carried verbatim from the request.
    pub filename: String,
    /// PNG bytes.
    pub bytes: Vec<u8>,
}

pub struct ThumbnailCache {
    entries: Mutex<HashMap<String, Arc<ThumbnailEntry>>>,
    width: u32,
    height: u32,
}

impl ThumbnailCache {
    /// Cache producing thumbnails at the default 140x120.
    pub fn new() -> Self {
        Self::with_dimensions(DEFAULT_THUMB_WIDTH, DEFAULT_THUMB_HEIGHT)
    }

    pub fn with_dimensions(width: u32, height: u32) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            width,
            height,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Return the memoized thumbnail for `key`, generating it on first
    /// request.
    ///
    /// A hit never touches the codec. A miss decodes `original_bytes`,
    /// center-crops, safety-resizes to the exact target size, and encodes
    /// PNG at default quality (PNG ignores the quality knob anyway).
    pub fn get_or_create(
        &self,
        codec: &impl ImageCodec,
        key: &str,
        filename: &str,
        original_bytes: &[u8],
    ) -> Result<Arc<ThumbnailEntry>, CodecError> {
        if let Some(entry) = self.entries.lock().unwrap().get(key) {
            return Ok(Arc::clone(entry));
        }

        // Generate outside the lock; a racing generator for the same key is
        // wasted work, not a correctness problem — first insert wins below.
        let buffer = codec.decode(original_bytes)?;
        let cropped = transform::crop_center(&buffer, self.width, self.height);
        let exact = transform::resize(&cropped, Some(self.width), Some(self.height));
        let encoded = codec.encode(&exact, OutputFormat::Png, Quality::default())?;

        let entry = Arc::new(ThumbnailEntry {
            key: key.to_string(),
            filename: filename.to_string(),
            bytes: encoded.bytes,
        });

        let mut entries = self.entries.lock().unwrap();
        let stored = entries
            .entry(key.to_string())
            .or_insert_with(|| Arc::clone(&entry));
        Ok(Arc::clone(stored))
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

impl Default for ThumbnailCache {
    fn default() -> Self {
        Self::new()
    }
}

/// SHA-256 of the source bytes as a hex string — a stable, content-addressed
/// cache key.
pub fn content_key(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("{digest:x}")
}
