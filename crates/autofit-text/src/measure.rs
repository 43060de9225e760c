#![forbid(unsafe_code)]

//! The text measurement capability.
//!
//! The sizing search never lays text out itself. It asks a [`TextMeasurer`]
//! supplied by the host how large a string renders at a candidate size, and
//! where the host's line breaker would wrap it.

use autofit_core::FontSpec;

/// Extra vertical space between lines.
///
/// Each line's height becomes `natural * multiplier + add`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSpacing {
    pub multiplier: f32,
    pub add: f32,
}

impl LineSpacing {
    /// No extra spacing.
    pub const NORMAL: Self = Self {
        multiplier: 1.0,
        add: 0.0,
    };

    /// Create line spacing from a multiplier and an addend.
    pub const fn new(multiplier: f32, add: f32) -> Self {
        Self { multiplier, add }
    }

    /// Apply to a natural line height.
    #[inline]
    pub fn apply(&self, natural: f32) -> f32 {
        natural * self.multiplier + self.add
    }
}

impl Default for LineSpacing {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Measurement of a string laid out on a single line.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineMetrics {
    /// Advance width of the whole string.
    pub width: f32,
    /// Recommended line height (font spacing).
    pub height: f32,
}

/// Parameters for a width-constrained multi-line layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Maximum line width in pixels.
    pub width: f32,
    /// Line spacing.
    pub spacing: LineSpacing,
}

impl LayoutParams {
    /// Create layout params with normal spacing.
    pub const fn new(width: f32) -> Self {
        Self {
            width,
            spacing: LineSpacing::NORMAL,
        }
    }

    /// Set line spacing.
    #[must_use]
    pub const fn spacing(mut self, spacing: LineSpacing) -> Self {
        self.spacing = spacing;
        self
    }
}

/// One line produced by the line breaker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSpan {
    /// Byte offset of the first character of the line.
    pub start: usize,
    /// Byte offset one past the last character (the next line's start).
    pub end: usize,
    /// Left extent of the line's ink.
    pub left: f32,
    /// Right extent of the line's ink.
    pub right: f32,
}

impl LineSpan {
    /// Visible width of the line.
    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }
}

/// Result of a multi-line layout.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextLayout {
    /// Lines in order. Never empty for a well-behaved measurer.
    pub lines: Vec<LineSpan>,
    /// Total height including line spacing.
    pub height: f32,
}

impl TextLayout {
    /// Number of lines.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Widest line width.
    pub fn max_line_width(&self) -> f32 {
        self.lines
            .iter()
            .map(LineSpan::width)
            .fold(0.0_f32, f32::max)
    }
}

/// Text measurement oracle supplied by the host's text engine.
///
/// Implementations must be deterministic for identical inputs and are
/// expected to be monotone in `size`: text that fits at one size also fits at
/// every smaller size.
pub trait TextMeasurer: Send + Sync {
    /// Measure `text` on a single line at `size` pixels.
    fn measure_line(&self, text: &str, font: &FontSpec, size: u32) -> LineMetrics;

    /// Break `text` into lines no wider than `params.width` at `size` pixels.
    fn layout(&self, text: &str, font: &FontSpec, size: u32, params: &LayoutParams) -> TextLayout;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure_line(&self, text: &str, font: &FontSpec, size: u32) -> LineMetrics {
        (**self).measure_line(text, font, size)
    }

    fn layout(&self, text: &str, font: &FontSpec, size: u32, params: &LayoutParams) -> TextLayout {
        (**self).layout(text, font, size, params)
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for std::sync::Arc<T> {
    fn measure_line(&self, text: &str, font: &FontSpec, size: u32) -> LineMetrics {
        (**self).measure_line(text, font, size)
    }

    fn layout(&self, text: &str, font: &FontSpec, size: u32, params: &LayoutParams) -> TextLayout {
        (**self).layout(text, font, size, params)
    }
}
