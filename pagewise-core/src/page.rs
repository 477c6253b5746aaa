//! Page visibility for partial-buffer redraws
//!
//! The display driver only backs one horizontal band of rows at a time. A
//! full refresh walks the bands top to bottom and asks every widget to draw
//! on each pass; widgets use [`PageController`] to skip bands they do not
//! touch. Every draw call must sit behind the predicate matching the
//! widget's vertical extent, otherwise it lands in a band the device buffer
//! is not holding.

/// One horizontal band of the display, rows inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Page {
    /// Position of this band within the refresh cycle (0 = first)
    pub index: u8,
    /// First row covered by the band
    pub start_row: u16,
    /// Last row covered by the band
    pub end_row: u16,
}

impl Page {
    /// Create a page covering `start_row..=end_row`
    pub const fn new(index: u8, start_row: u16, end_row: u16) -> Self {
        Self {
            index,
            start_row,
            end_row,
        }
    }

    /// Number of rows in the band
    pub const fn rows(&self) -> u16 {
        self.end_row.saturating_sub(self.start_row) + 1
    }

    /// Whether this is the first band of a refresh cycle
    pub const fn is_first(&self) -> bool {
        self.index == 0
    }
}

/// Visibility predicates for the band currently being rendered
///
/// Pure functions of the current [`Page`]; holds no other state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PageController {
    page: Page,
}

impl PageController {
    /// Wrap the band handed out by the display backend for this pass
    pub const fn new(page: Page) -> Self {
        Self { page }
    }

    /// The band being rendered
    pub const fn page(&self) -> Page {
        self.page
    }

    /// True when the band starts at or above row `y`
    ///
    /// Gates widgets that occupy everything from the top of the screen down
    /// to `y`: once the band starts below `y` there is nothing left to draw.
    #[inline]
    pub const fn is_above(&self, y: u16) -> bool {
        self.page.start_row <= y
    }

    /// True when the band intersects the closed row interval `[y0, y1]`
    #[inline]
    pub const fn overlaps(&self, y0: u16, y1: u16) -> bool {
        self.page.start_row <= y1 && self.page.end_row >= y0
    }

    /// True on the first band of a refresh cycle
    #[inline]
    pub const fn is_first(&self) -> bool {
        self.page.is_first()
    }
}

/// Ordered, non-overlapping bands covering the whole display height
///
/// Iterates top to bottom. The last band is shortened when the display
/// height is not a multiple of the band height.
#[derive(Debug, Clone)]
pub struct PageSequence {
    height: u16,
    rows: u16,
    next_row: u16,
    next_index: u8,
}

impl PageSequence {
    /// Bands of `rows` rows over a display `height` rows tall
    ///
    /// A zero band height or zero display height yields no pages.
    pub const fn new(height: u16, rows: u16) -> Self {
        Self {
            height,
            rows,
            next_row: 0,
            next_index: 0,
        }
    }

    /// Number of bands in one refresh cycle
    pub const fn page_count(&self) -> u16 {
        if self.rows == 0 {
            return 0;
        }
        self.height.div_ceil(self.rows)
    }
}

impl Iterator for PageSequence {
    type Item = Page;

    fn next(&mut self) -> Option<Page> {
        if self.rows == 0 || self.next_row >= self.height {
            return None;
        }
        let start = self.next_row;
        let end = start.saturating_add(self.rows - 1).min(self.height - 1);
        let page = Page::new(self.next_index, start, end);
        self.next_row = end + 1;
        self.next_index = self.next_index.wrapping_add(1);
        Some(page)
    }
}
