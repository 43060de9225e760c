#![forbid(unsafe_code)]

//! LRU memoization in front of a [`TextMeasurer`].
//!
//! A sizing search measures the same text at a handful of sizes, and grouped or
//! dynamic elements repeat the same measurements on every adjustment. Real text
//! engines are expensive to ask, so [`CachedMeasurer`] remembers results.
//!
//! # Example
//! ```
//! use autofit_core::FontSpec;
//! use autofit_text::{CachedMeasurer, CellMeasurer, TextMeasurer};
//!
//! let measurer = CachedMeasurer::new(CellMeasurer::default(), 256);
//! let font = FontSpec::default();
//!
//! let a = measurer.measure_line("Hello", &font, 12);
//! let b = measurer.measure_line("Hello", &font, 12);
//! assert_eq!(a, b);
//!
//! let stats = measurer.stats();
//! assert_eq!(stats.hits, 1);
//! assert_eq!(stats.misses, 1);
//! ```

use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard};

use autofit_core::FontSpec;
use lru::LruCache;
use rustc_hash::FxHasher;
use tracing::trace;

use crate::measure::{LayoutParams, LineMetrics, TextLayout, TextMeasurer};

/// Default cache capacity, per result kind.
pub const DEFAULT_CACHE_CAPACITY: usize = 4096;

/// Statistics about cache performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Current number of entries (both kinds).
    pub size: usize,
    /// Maximum capacity per kind.
    pub capacity: usize,
}

impl CacheStats {
    /// Calculate hit rate (0.0 to 1.0).
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[derive(Debug)]
struct Entries {
    lines: LruCache<u64, LineMetrics>,
    layouts: LruCache<u64, TextLayout>,
    hits: u64,
    misses: u64,
}

/// A [`TextMeasurer`] that caches another measurer's answers.
///
/// Keys are 64-bit FxHash digests of the full request (text, font, size and,
/// for layouts, width and spacing bit patterns). Collisions are possible in
/// theory and ignored in practice, as with any hashed-key cache.
///
/// # Thread Safety
/// Entries sit behind a `Mutex`, so the cache can be shared across elements
/// through an `Arc`. The lock is released before the inner measurer runs.
#[derive(Debug)]
pub struct CachedMeasurer<M> {
    inner: M,
    entries: Mutex<Entries>,
}

impl<M: TextMeasurer> CachedMeasurer<M> {
    /// Wrap `inner` with a cache of `capacity` entries per result kind.
    ///
    /// If capacity is zero, defaults to 1.
    #[must_use]
    pub fn new(inner: M, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            entries: Mutex::new(Entries {
                lines: LruCache::new(capacity),
                layouts: LruCache::new(capacity),
                hits: 0,
                misses: 0,
            }),
        }
    }

    /// Wrap `inner` with the default capacity.
    #[must_use]
    pub fn with_default_capacity(inner: M) -> Self {
        Self::new(inner, DEFAULT_CACHE_CAPACITY)
    }

    /// The wrapped measurer.
    pub fn inner(&self) -> &M {
        &self.inner
    }

    fn entries(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Get cache statistics.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let entries = self.entries();
        CacheStats {
            hits: entries.hits,
            misses: entries.misses,
            size: entries.lines.len() + entries.layouts.len(),
            capacity: entries.lines.cap().get(),
        }
    }

    /// Get the current number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let entries = self.entries();
        entries.lines.len() + entries.layouts.len()
    }

    /// Check if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all cached results.
    pub fn clear(&self) {
        let mut entries = self.entries();
        entries.lines.clear();
        entries.layouts.clear();
    }

    /// Reset statistics.
    pub fn reset_stats(&self) {
        let mut entries = self.entries();
        entries.hits = 0;
        entries.misses = 0;
    }
}

impl<M: TextMeasurer> TextMeasurer for CachedMeasurer<M> {
    fn measure_line(&self, text: &str, font: &FontSpec, size: u32) -> LineMetrics {
        let key = line_key(text, font, size);
        {
            let mut entries = self.entries();
            if let Some(&metrics) = entries.lines.get(&key) {
                entries.hits += 1;
                return metrics;
            }
            entries.misses += 1;
        }
        trace!(size, bytes = text.len(), "line cache miss");

        let metrics = self.inner.measure_line(text, font, size);
        if let Some((evicted, _)) = self.entries().lines.push(key, metrics) {
            if evicted != key {
                trace!(evicted, "line cache evicted entry");
            }
        }
        metrics
    }

    fn layout(&self, text: &str, font: &FontSpec, size: u32, params: &LayoutParams) -> TextLayout {
        let key = layout_key(text, font, size, params);
        {
            let mut entries = self.entries();
            if let Some(layout) = entries.layouts.get(&key) {
                let layout = layout.clone();
                entries.hits += 1;
                return layout;
            }
            entries.misses += 1;
        }
        trace!(size, bytes = text.len(), width = params.width, "layout cache miss");

        let layout = self.inner.layout(text, font, size, params);
        if let Some((evicted, _)) = self.entries().layouts.push(key, layout.clone()) {
            if evicted != key {
                trace!(evicted, "layout cache evicted entry");
            }
        }
        layout
    }
}

#[inline]
fn line_key(text: &str, font: &FontSpec, size: u32) -> u64 {
    let mut hasher = FxHasher::default();
    text.hash(&mut hasher);
    font.hash(&mut hasher);
    size.hash(&mut hasher);
    hasher.finish()
}

#[inline]
fn layout_key(text: &str, font: &FontSpec, size: u32, params: &LayoutParams) -> u64 {
    let mut hasher = FxHasher::default();
    text.hash(&mut hasher);
    font.hash(&mut hasher);
    size.hash(&mut hasher);
    params.width.to_bits().hash(&mut hasher);
    params.spacing.multiplier.to_bits().hash(&mut hasher);
    params.spacing.add.to_bits().hash(&mut hasher);
    hasher.finish()
}
