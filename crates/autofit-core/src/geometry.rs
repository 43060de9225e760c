#![forbid(unsafe_code)]

//! Geometric primitives.

/// A width/height pair in device pixels.
///
/// Used both for the space a text needs at a given font size and for the
/// space an element offers. All comparisons are anchored at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extent {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Extent {
    /// Zero-sized extent.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new extent.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Check whether `self` fits inside `available`.
    ///
    /// Both boxes start at (0, 0), so this reduces to two `<=` comparisons.
    #[inline]
    pub fn fits_within(&self, available: Extent) -> bool {
        self.width <= available.width && self.height <= available.height
    }

    /// Check if the extent has zero (or negative) area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Padding around an element's content, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sides {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Sides {
    /// Create new sides with equal values.
    pub const fn all(val: i32) -> Self {
        Self {
            top: val,
            right: val,
            bottom: val,
            left: val,
        }
    }

    /// Create new sides with horizontal values only.
    pub const fn horizontal(val: i32) -> Self {
        Self {
            top: 0,
            right: val,
            bottom: 0,
            left: val,
        }
    }

    /// Create new sides with specific values.
    pub const fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Sum of left and right.
    #[inline]
    pub const fn horizontal_sum(&self) -> i32 {
        self.left.saturating_add(self.right)
    }

    /// Sum of top and bottom.
    #[inline]
    pub const fn vertical_sum(&self) -> i32 {
        self.top.saturating_add(self.bottom)
    }
}

/// The space left for text inside an element: measured size minus padding.
///
/// Signed, because padding can exceed the measured size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContentBox {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl ContentBox {
    /// Create a content box directly.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Measured element size minus its padding.
    pub const fn from_measured(width: i32, height: i32, padding: Sides) -> Self {
        Self {
            width: width.saturating_sub(padding.horizontal_sum()),
            height: height.saturating_sub(padding.vertical_sum()),
        }
    }

    /// True when there is no horizontal room at all.
    #[inline]
    pub const fn is_degenerate(&self) -> bool {
        self.width <= 0
    }

    /// Convert to a floating point extent.
    #[inline]
    pub fn to_extent(self) -> Extent {
        Extent::new(self.width as f32, self.height as f32)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn fits_is_monotone_in_available(
            w in 0.0f32..1000.0,
            h in 0.0f32..1000.0,
            extra_w in 0.0f32..100.0,
            extra_h in 0.0f32..100.0,
        ) {
            let need = Extent::new(w, h);
            let avail = Extent::new(w + extra_w, h + extra_h);
            prop_assert!(need.fits_within(avail));
        }

        #[test]
        fn content_box_never_exceeds_measured(
            w in 0i32..4000,
            h in 0i32..4000,
            pad in 0i32..200,
        ) {
            let content = ContentBox::from_measured(w, h, Sides::all(pad));
            prop_assert!(content.width <= w);
            prop_assert!(content.height <= h);
        }
    }
}
