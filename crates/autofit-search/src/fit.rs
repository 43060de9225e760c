#![forbid(unsafe_code)]

//! The text fit test.
//!
//! [`TextFitTester`] turns a [`TextMeasurer`] and a [`SizingContext`] into the
//! oracle the search needs.
//!
//! # Decision Rule
//!
//! 1) Single line: the text must fit as one line (width x font spacing).
//! 2) Multi-line: lay the text out at the available width, then
//!    - more lines than the limit allows -> too large;
//!    - any soft break that is not a natural word wrap -> too large;
//!    - otherwise the widest line and the total height must fit.
//! 3) Fits -> [`FitVerdict::TooSmall`], otherwise [`FitVerdict::TooLarge`].
//!
//! The tester never answers [`FitVerdict::ExactFit`]; that verdict is left to
//! custom oracles.

use std::num::NonZeroU32;

use autofit_core::{Extent, FontSpec};
use autofit_text::wrap::soft_breaks_are_valid;
use autofit_text::{LayoutParams, LineSpacing, TextMeasurer};
use tracing::debug;

use crate::search::{FitVerdict, SearchOutcome, find_best_size};

/// Maximum number of lines a text may occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineLimit {
    /// Any number of lines.
    #[default]
    Unlimited,
    /// At most this many lines.
    Lines(NonZeroU32),
}

impl LineLimit {
    /// Raw value hosts use to say "no limit".
    pub const NO_LIMIT: i32 = -1;

    /// A single line.
    pub const SINGLE: Self = Self::Lines(NonZeroU32::MIN);

    /// Interpret a host's raw line count; zero and negatives mean no limit.
    pub fn from_raw(raw: i32) -> Self {
        u32::try_from(raw)
            .ok()
            .and_then(NonZeroU32::new)
            .map_or(Self::Unlimited, Self::Lines)
    }

    /// Raw value for hosts, with [`Self::NO_LIMIT`] for unlimited.
    pub fn as_raw(self) -> i32 {
        match self {
            Self::Unlimited => Self::NO_LIMIT,
            Self::Lines(n) => i32::try_from(n.get()).unwrap_or(i32::MAX),
        }
    }

    /// True for a limit of exactly one line.
    #[inline]
    pub fn is_single_line(self) -> bool {
        self == Self::SINGLE
    }

    /// Check whether `count` lines are allowed.
    #[inline]
    pub fn allows(self, count: usize) -> bool {
        match self {
            Self::Unlimited => true,
            Self::Lines(n) => count <= n.get() as usize,
        }
    }
}

/// Everything a fit test needs, captured fresh for each adjustment.
#[derive(Debug, Clone, PartialEq)]
pub struct SizingContext {
    /// Text after display transforms.
    pub text: String,
    /// Space offered by the element.
    pub available: Extent,
    /// Line limit for multi-line layout.
    pub max_lines: LineLimit,
    /// Line spacing for multi-line layout.
    pub spacing: LineSpacing,
    /// Measure as a single line.
    pub single_line: bool,
    /// Font to measure with.
    pub font: FontSpec,
}

impl SizingContext {
    /// Create a multi-line context with no line limit.
    pub fn new(text: impl Into<String>, available: Extent) -> Self {
        Self {
            text: text.into(),
            available,
            max_lines: LineLimit::Unlimited,
            spacing: LineSpacing::NORMAL,
            single_line: false,
            font: FontSpec::default(),
        }
    }

    /// Set the line limit. A limit of one line switches to single-line mode.
    #[must_use]
    pub fn max_lines(mut self, limit: LineLimit) -> Self {
        self.max_lines = limit;
        self.single_line = limit.is_single_line();
        self
    }

    /// Force single-line mode on or off.
    #[must_use]
    pub fn single_line(mut self, single_line: bool) -> Self {
        self.single_line = single_line;
        self
    }

    /// Set line spacing.
    #[must_use]
    pub fn spacing(mut self, spacing: LineSpacing) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the font.
    #[must_use]
    pub fn font(mut self, font: FontSpec) -> Self {
        self.font = font;
        self
    }

    /// Layout parameters for the multi-line simulation.
    #[inline]
    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams::new(self.available.width).spacing(self.spacing)
    }
}

/// Fit test backed by a text measurer.
#[derive(Debug, Clone)]
pub struct TextFitTester<M> {
    measurer: M,
}

impl<M: TextMeasurer> TextFitTester<M> {
    /// Create a tester.
    pub fn new(measurer: M) -> Self {
        Self { measurer }
    }

    /// The space `ctx.text` needs at `size`, or `None` when the layout itself
    /// is unacceptable (too many lines or an unnatural break).
    pub fn required_extent(&self, size: u32, ctx: &SizingContext) -> Option<Extent> {
        if ctx.single_line {
            let metrics = self.measurer.measure_line(&ctx.text, &ctx.font, size);
            return Some(Extent::new(metrics.width, metrics.height));
        }

        let layout = self
            .measurer
            .layout(&ctx.text, &ctx.font, size, &ctx.layout_params());
        if !ctx.max_lines.allows(layout.line_count()) {
            return None;
        }
        if !soft_breaks_are_valid(&ctx.text, &layout.lines) {
            return None;
        }
        Some(Extent::new(layout.max_line_width(), layout.height))
    }

    /// Test one candidate size.
    pub fn test(&self, size: u32, ctx: &SizingContext) -> FitVerdict {
        match self.required_extent(size, ctx) {
            Some(required) if required.fits_within(ctx.available) => FitVerdict::TooSmall,
            _ => FitVerdict::TooLarge,
        }
    }
}

/// Search `[min, max)` for the largest size at which `ctx` fits.
pub fn fit_text<M: TextMeasurer>(
    measurer: M,
    min: u32,
    max: u32,
    ctx: &SizingContext,
) -> SearchOutcome {
    let tester = TextFitTester::new(measurer);
    let outcome = find_best_size(min, max, |size| tester.test(size, ctx));
    debug!(
        min,
        max,
        size = outcome.size,
        attempts = outcome.attempts,
        exact = outcome.exact,
        single_line = ctx.single_line,
        "fit search finished"
    );
    outcome
}
