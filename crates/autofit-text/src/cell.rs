#![forbid(unsafe_code)]

//! Reference measurer on a fixed cell grid.
//!
//! Every grapheme advances by its display width in cells (CJK is two cells),
//! and a cell is `size * advance_ratio` pixels wide. Lines are
//! `size * line_height_ratio` pixels tall before line spacing. The face in
//! [`FontSpec`] is not consulted: all families measure alike.
//!
//! Useful for headless hosts, terminals, and deterministic tests.
//!
//! # Example
//! ```
//! use autofit_core::FontSpec;
//! use autofit_text::{CellMeasurer, TextMeasurer};
//!
//! let measurer = CellMeasurer::default();
//! let metrics = measurer.measure_line("Hi", &FontSpec::default(), 20);
//! assert_eq!(metrics.width, 20.0);
//! assert_eq!(metrics.height, 25.0);
//! ```

use autofit_core::FontSpec;

use crate::measure::{LayoutParams, LineMetrics, TextLayout, TextMeasurer};
use crate::wrap::{break_lines, display_width};

/// Default cell width as a fraction of the font size.
pub const DEFAULT_ADVANCE_RATIO: f32 = 0.5;
/// Default line height as a multiple of the font size.
pub const DEFAULT_LINE_HEIGHT_RATIO: f32 = 1.25;

/// Monospace measurer backed by Unicode display widths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMeasurer {
    advance_ratio: f32,
    line_height_ratio: f32,
}

impl CellMeasurer {
    /// Create a measurer with explicit ratios.
    pub const fn new(advance_ratio: f32, line_height_ratio: f32) -> Self {
        Self {
            advance_ratio,
            line_height_ratio,
        }
    }

    /// Pixel width of one cell at `size`.
    #[inline]
    pub fn cell_advance(&self, size: u32) -> f32 {
        size as f32 * self.advance_ratio
    }

    /// Natural line height at `size`.
    #[inline]
    pub fn line_height(&self, size: u32) -> f32 {
        size as f32 * self.line_height_ratio
    }
}

impl Default for CellMeasurer {
    fn default() -> Self {
        Self::new(DEFAULT_ADVANCE_RATIO, DEFAULT_LINE_HEIGHT_RATIO)
    }
}

impl TextMeasurer for CellMeasurer {
    fn measure_line(&self, text: &str, _font: &FontSpec, size: u32) -> LineMetrics {
        LineMetrics {
            width: display_width(text) as f32 * self.cell_advance(size),
            height: self.line_height(size),
        }
    }

    fn layout(&self, text: &str, _font: &FontSpec, size: u32, params: &LayoutParams) -> TextLayout {
        let lines = break_lines(text, params.width, self.cell_advance(size));
        let height = lines.len() as f32 * params.spacing.apply(self.line_height(size));
        TextLayout { lines, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::LineSpacing;

    fn font() -> FontSpec {
        FontSpec::default()
    }

    #[test]
    fn single_line_scales_with_size() {
        let m = CellMeasurer::default();
        let small = m.measure_line("hello", &font(), 10);
        let large = m.measure_line("hello", &font(), 20);
        assert_eq!(small.width, 25.0);
        assert_eq!(large.width, 50.0);
        assert_eq!(small.height, 12.5);
    }

    #[test]
    fn wide_chars_take_two_cells() {
        let m = CellMeasurer::new(1.0, 1.0);
        assert_eq!(m.measure_line("中a", &font(), 10).width, 30.0);
    }

    #[test]
    fn layout_wraps_at_width() {
        let m = CellMeasurer::new(1.0, 1.0);
        let text = "hello world";
        let layout = m.layout(text, &font(), 10, &LayoutParams::new(60.0));
        assert_eq!(layout.line_count(), 2);
        assert_eq!(layout.max_line_width(), 50.0);
        assert_eq!(layout.height, 20.0);
    }

    #[test]
    fn layout_applies_spacing_per_line() {
        let m = CellMeasurer::new(1.0, 1.0);
        let params = LayoutParams::new(1000.0).spacing(LineSpacing::new(1.5, 2.0));
        let layout = m.layout("a\nb\nc", &font(), 10, &params);
        assert_eq!(layout.line_count(), 3);
        assert_eq!(layout.height, 3.0 * 17.0);
    }

    #[test]
    fn style_does_not_change_metrics() {
        let m = CellMeasurer::default();
        let bold = FontSpec::new("Mono").style(autofit_core::FontStyle::Bold);
        assert_eq!(
            m.measure_line("abc", &bold, 12),
            m.measure_line("abc", &font(), 12)
        );
    }
}
