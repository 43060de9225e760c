#![forbid(unsafe_code)]

//! Line breaking rules.
//!
//! Two halves live here:
//! - [`is_valid_word_wrap`] judges a break some measurer already made. A
//!   break is natural when the character before it is a space, a hyphen, a
//!   newline, or a wide (3+ byte UTF-8) character such as CJK ideographs,
//!   which may break without whitespace.
//! - [`break_lines`] is a greedy grapheme-aware line breaker on a fixed cell
//!   grid, used by [`CellMeasurer`](crate::CellMeasurer). It prefers natural
//!   break points and falls back to a mid-word break when a word alone is
//!   wider than the line, exactly the kind of break the fit test rejects.
//!
//! # Example
//! ```
//! use autofit_text::wrap::{break_lines, is_valid_word_wrap};
//!
//! let text = "hello world";
//! let lines = break_lines(text, 5.0, 1.0);
//! assert_eq!(lines.len(), 2);
//! assert_eq!(&text[lines[0].start..lines[0].end], "hello ");
//! assert!(is_valid_word_wrap(' ', 'w'));
//! assert!(!is_valid_word_wrap('l', 'o'));
//! ```

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::measure::LineSpan;

/// Check whether a break between `before` and `after` is a natural wrap point.
///
/// Only the preceding character decides; `after` is accepted for symmetry
/// with the boundary pair a layout reports.
#[inline]
pub fn is_valid_word_wrap(before: char, _after: char) -> bool {
    matches!(before, ' ' | '-' | '\n') || is_wide_encoding(before)
}

/// True when `c` takes more than two bytes in UTF-8.
#[inline]
pub fn is_wide_encoding(c: char) -> bool {
    c.len_utf8() > 2
}

/// The character pair around byte offset `offset`, if both exist.
pub fn boundary_chars(text: &str, offset: usize) -> Option<(char, char)> {
    if offset == 0 || !text.is_char_boundary(offset) {
        return None;
    }
    let before = text[..offset].chars().next_back()?;
    let after = text[offset..].chars().next()?;
    Some((before, after))
}

/// Check every soft break of a layout, skipping the final line.
pub fn soft_breaks_are_valid(text: &str, lines: &[LineSpan]) -> bool {
    let Some((_, head)) = lines.split_last() else {
        return true;
    };
    head.iter().all(|line| match boundary_chars(text, line.end) {
        Some((before, after)) => is_valid_word_wrap(before, after),
        None => true,
    })
}

/// Display width of text in cells. Control characters are zero width.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.graphemes(true).map(grapheme_cells).sum()
}

#[inline]
fn grapheme_cells(grapheme: &str) -> usize {
    if grapheme.chars().any(char::is_control) {
        0
    } else {
        grapheme.width()
    }
}

#[inline]
fn is_hard_break(grapheme: &str) -> bool {
    grapheme == "\n" || grapheme == "\r\n"
}

#[inline]
fn is_blank(grapheme: &str) -> bool {
    grapheme.chars().all(char::is_whitespace)
}

#[inline]
fn allows_break_after(grapheme: &str) -> bool {
    grapheme
        .chars()
        .next_back()
        .is_some_and(|c| c == ' ' || c == '-' || is_wide_encoding(c))
}

/// Build a span for `text[start..end]`; trailing whitespace is not ink.
fn span(text: &str, start: usize, end: usize, cell_advance: f32) -> LineSpan {
    let ink = display_width(text[start..end].trim_end());
    LineSpan {
        start,
        end,
        left: 0.0,
        right: ink as f32 * cell_advance,
    }
}

/// Greedy line breaking on a cell grid.
///
/// `max_width` and `cell_advance` share a unit (pixels for the cell
/// measurer). Whitespace may hang past `max_width`; a visible grapheme that
/// would overflow moves to the next line, taking the partial word with it
/// when an earlier natural break exists. Every line holds at least one
/// grapheme, so overlong graphemes overflow instead of looping.
///
/// Returns at least one span; spans are contiguous and cover `text`.
#[must_use]
pub fn break_lines(text: &str, max_width: f32, cell_advance: f32) -> Vec<LineSpan> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut pen = 0.0_f32;
    let mut last_break: Option<usize> = None;

    for (idx, grapheme) in text.grapheme_indices(true) {
        let end = idx + grapheme.len();

        if is_hard_break(grapheme) {
            lines.push(span(text, start, end, cell_advance));
            start = end;
            pen = 0.0;
            last_break = None;
            continue;
        }

        let advance = grapheme_cells(grapheme) as f32 * cell_advance;
        if !is_blank(grapheme) && idx > start && pen + advance > max_width {
            let at = last_break.filter(|&b| b > start).unwrap_or(idx);
            lines.push(span(text, start, at, cell_advance));
            start = at;
            pen = display_width(&text[start..idx]) as f32 * cell_advance;
            last_break = None;
        }

        pen += advance;
        if allows_break_after(grapheme) {
            last_break = Some(end);
        }
    }

    if start < text.len() || lines.is_empty() || text.ends_with('\n') {
        lines.push(span(text, start, text.len(), cell_advance));
    }

    lines
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn spans_cover_text_contiguously(s in "[a-z \\-\n]{0,120}", width in 1.0f32..40.0) {
            let lines = break_lines(&s, width, 1.0);
            prop_assert!(!lines.is_empty());
            prop_assert_eq!(lines[0].start, 0);
            prop_assert_eq!(lines.last().unwrap().end, s.len());
            for pair in lines.windows(2) {
                prop_assert_eq!(pair[0].end, pair[1].start);
            }
        }

        #[test]
        fn lines_respect_width_when_words_fit(
            words in prop::collection::vec("[a-z]{1,5}", 1..20),
            width in 5.0f32..40.0,
        ) {
            let text = words.join(" ");
            let lines = break_lines(&text, width, 1.0);
            for line in &lines {
                prop_assert!(line.width() <= width);
            }
            prop_assert!(soft_breaks_are_valid(&text, &lines));
        }

        #[test]
        fn only_the_last_line_may_be_empty(s in "[a-z \n]{0,80}", width in 1.0f32..20.0) {
            let lines = break_lines(&s, width, 1.0);
            let (_, head) = lines.split_last().unwrap();
            for line in head {
                prop_assert!(line.end > line.start);
            }
        }
    }
}
