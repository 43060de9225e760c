#![forbid(unsafe_code)]

//! Text measurement for autofit.
//!
//! This crate defines what the sizing search needs to know about text:
//! - [`TextMeasurer`] - the host's measurement oracle
//! - [`LineMetrics`], [`TextLayout`], [`LineSpan`] - measurement results
//! - [`wrap`] - word-wrap validity and a reference line breaker
//! - [`TextTransform`] - display transforms applied before measuring
//! - [`CellMeasurer`] - a deterministic cell-grid measurer
//! - [`CachedMeasurer`] - LRU memoization in front of any measurer
//!
//! # Example
//! ```
//! use autofit_core::FontSpec;
//! use autofit_text::{CellMeasurer, LayoutParams, TextMeasurer, wrap};
//!
//! let measurer = CellMeasurer::new(1.0, 1.0);
//! let text = "several short words";
//! let layout = measurer.layout(text, &FontSpec::default(), 10, &LayoutParams::new(130.0));
//! assert_eq!(layout.line_count(), 2);
//! assert!(wrap::soft_breaks_are_valid(text, &layout.lines));
//! ```

pub mod cell;
pub mod measure;
pub mod measure_cache;
pub mod transform;
pub mod wrap;

pub use cell::CellMeasurer;
pub use measure::{LayoutParams, LineMetrics, LineSpacing, LineSpan, TextLayout, TextMeasurer};
pub use measure_cache::{CacheStats, CachedMeasurer, DEFAULT_CACHE_CAPACITY};
pub use transform::TextTransform;
pub use wrap::{display_width, is_valid_word_wrap};
