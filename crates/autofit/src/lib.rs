#![forbid(unsafe_code)]

//! Auto-fit font sizing, public facade crate.
//!
//! Re-exports the types most hosts need from the internal crates and offers
//! a prelude. A typical host creates one [`FitScope`] per screen, attaches an
//! [`AutoFit`] element to each text widget, and forwards the widget's layout
//! and text notifications to it.
//!
//! # Example
//! ```
//! use autofit::prelude::*;
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
//! fn main() -> autofit::Result<()> {
//!     let scope = autofit::scope_from_lookup(CellMeasurer::default(), |_| None)?;
//!     let mut label = scope.attach(Label { text: "Hi".into(), px: 14 });
//!     assert_eq!(label.request_layout().map(|r| r.size), Some(40));
//!     Ok(())
//! }
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use autofit_core::{ConfigError, ContentBox, Extent, FontSpec, FontStyle, Sides, SizingConfig};

// --- Text re-exports -------------------------------------------------------

pub use autofit_text::{
    CachedMeasurer, CellMeasurer, LayoutParams, LineMetrics, LineSpacing, LineSpan, TextLayout,
    TextMeasurer, TextTransform,
};

// --- Search re-exports -----------------------------------------------------

pub use autofit_search::{
    FitVerdict, LineLimit, SearchOutcome, SizingContext, TextFitTester, find_best_size, fit_text,
};

// --- Cache re-exports ------------------------------------------------------

pub use autofit_cache::{
    AutoFit, ElementId, FitScope, GroupKey, RecordOutcome, Resolution, ResultCache, SizeSource,
    TextHost,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for autofit hosts.
#[derive(Debug)]
pub enum Error {
    /// Sizing configuration could not be loaded.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "configuration error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for autofit APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Build a scope configured from `AUTOFIT_*` environment variables.
pub fn scope_from_env(measurer: impl TextMeasurer + 'static) -> Result<FitScope> {
    Ok(FitScope::from_env(measurer)?)
}

/// Build a scope configured from an arbitrary key lookup.
pub fn scope_from_lookup<F>(measurer: impl TextMeasurer + 'static, lookup: F) -> Result<FitScope>
where
    F: Fn(&str) -> Option<String>,
{
    let config = SizingConfig::from_lookup(lookup)?;
    Ok(FitScope::new(measurer, config))
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        AutoFit, CellMeasurer, Error, FitScope, FontSpec, GroupKey, LineLimit, Resolution, Result,
        Sides, SizeSource, SizingConfig, TextHost, TextMeasurer,
    };

    pub use crate::{cache, core, search, text};
}

pub use autofit_cache as cache;
pub use autofit_core as core;
pub use autofit_search as search;
pub use autofit_text as text;
