#![forbid(unsafe_code)]

//! Font size search for autofit.
//!
//! - [`find_best_size`] - binary search over `[min, max)` against any oracle
//! - [`TextFitTester`] - the oracle for text, backed by a
//!   [`TextMeasurer`](autofit_text::TextMeasurer)
//! - [`SizingContext`] - per-adjustment input to the fit test
//! - [`fit_text`] - both together
//!
//! # Example
//! ```
//! use autofit_core::Extent;
//! use autofit_search::{SizingContext, fit_text};
//! use autofit_text::CellMeasurer;
//!
//! let ctx = SizingContext::new("Hi", Extent::new(200.0, 50.0)).single_line(true);
//! let outcome = fit_text(CellMeasurer::default(), 7, 99, &ctx);
//! assert_eq!(outcome.size, 40);
//! ```

pub mod fit;
pub mod search;

pub use fit::{LineLimit, SizingContext, TextFitTester, fit_text};
pub use search::{FitVerdict, SearchOutcome, find_best_size};
