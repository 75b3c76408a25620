// SPDX-License-Identifier: MPL-2.0
//! LRU cache for grid thumbnails.
//!
//! Grid cells and story covers request thumbnails repeatedly while the user
//! scrolls; decoding them every frame would stall the UI. The cache keeps
//! the most recently shown thumbnails and regenerates evicted ones on
//! demand.

use crate::config::THUMBNAIL_SIZE;
use crate::error::Result;
use crate::media::{self, ImageData, MediaType};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Default number of cached thumbnails.
const DEFAULT_CAPACITY: usize = 512;

/// Caches decoded thumbnails keyed by file path.
pub struct ThumbnailCache {
    cache: LruCache<PathBuf, ImageData>,
    edge: u32,
}

impl ThumbnailCache {
    /// Creates a cache with the default capacity and thumbnail size.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a cache holding at most `capacity` thumbnails.
    ///
    /// A zero capacity is coerced to 1 so the cache stays usable.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).expect("capacity is at least 1");
        Self {
            cache: LruCache::new(capacity),
            edge: THUMBNAIL_SIZE,
        }
    }

    /// Returns the cached thumbnail for `path`, loading it on a miss.
    ///
    /// Videos use their poster frame; images are decoded and downscaled.
    pub fn get_or_load(&mut self, path: &Path, kind: MediaType) -> Result<ImageData> {
        if let Some(data) = self.cache.get(path) {
            return Ok(data.clone());
        }

        let data = match kind {
            MediaType::Image => media::load_thumbnail(path, self.edge)?,
            MediaType::Video => media::video::extract_poster(path)?,
        };

        self.cache.put(path.to_path_buf(), data.clone());
        Ok(data)
    }

    /// Stores a thumbnail decoded elsewhere (e.g. on a blocking task).
    pub fn insert(&mut self, path: PathBuf, data: ImageData) {
        self.cache.put(path, data);
    }

    /// Returns the cached thumbnail without loading or touching LRU order.
    /// Usable from `view`, which only has shared access.
    #[must_use]
    pub fn peek(&self, path: &Path) -> Option<&ImageData> {
        self.cache.peek(path)
    }

    /// Number of thumbnails currently cached.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Drops all cached thumbnails (e.g., after a library rescan).
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl Default for ThumbnailCache {
    fn default() -> Self {
        Self::new()
    }
}
