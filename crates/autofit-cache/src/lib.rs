#![forbid(unsafe_code)]

//! Group result cache and element driver for autofit.
//!
//! - [`ResultCache`] - group key -> settled size, first writer wins
//! - [`ElementSizingState`] - per-element bounds and resolved size
//! - [`AutoFit`] - keeps a [`TextHost`]'s font size fitted
//! - [`FitScope`] - hands out elements that share one cache
//!
//! # Example
//! ```
//! use autofit_cache::{FitScope, SizeSource, TextHost};
//! use autofit_core::Sides;
//!
//! struct Label { text: String, px: u32 }
//!
//! impl TextHost for Label {
//!     fn text(&self) -> &str { &self.text }
//!     fn measured_size(&self) -> (i32, i32) { (200, 50) }
//!     fn padding(&self) -> Sides { Sides::default() }
//!     fn font_size_px(&self) -> u32 { self.px }
//!     fn set_font_size_px(&mut self, px: u32) { self.px = px; }
//! }
//!
//! let scope = FitScope::default();
//! let mut total = scope.attach_grouped(Label { text: "1,234.00".into(), px: 14 }, "amounts");
//! let mut tax = scope.attach_grouped(Label { text: "56.78".into(), px: 14 }, "amounts");
//!
//! let first = total.request_layout().unwrap();
//! let second = tax.request_layout().unwrap();
//! assert_eq!(second.source, SizeSource::Group);
//! assert_eq!(second.size, first.size);
//! ```

pub mod element;
pub mod group;
pub mod scope;
pub mod state;

pub use element::{AutoFit, Resolution, SizeSource, TextHost};
pub use group::{ElementId, GroupEntry, GroupKey, RecordOutcome, ResultCache, ResultCacheStats};
pub use scope::FitScope;
pub use state::{Decision, ElementSizingState};
