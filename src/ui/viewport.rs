//! Viewport management for scrolling.
//!
//! The [`Viewport`] struct tracks the visible display rows of a text area
//! and handles all scroll operations.

use std::ops::Range;

/// Manages the visible portion of a text area.
///
/// Scrolling may continue until the last row sits at the top, so the area
/// below the content can be empty.
///
/// # Example
///
/// ```
/// use codingg::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(80, 24, 100);
/// assert_eq!(vp.visible_range(), 0..24);
///
/// vp.scroll_down(10);
/// assert_eq!(vp.visible_range(), 10..34);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
    offset: usize,
    total_rows: usize,
}

impl Viewport {
    /// Create a viewport over `total_rows` display rows.
    pub const fn new(width: u16, height: u16, total_rows: usize) -> Self {
        Self {
            width,
            height,
            offset: 0,
            total_rows,
        }
    }

    /// Index of the display row drawn at the top.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Display rows currently on screen, clamped to the content.
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.offset.min(self.total_rows);
        let end = (self.offset + self.height as usize).min(self.total_rows);
        start..end
    }

    /// Top and bottom of the visible area as fractions of the content.
    pub fn fractions(&self) -> (f64, f64) {
        if self.total_rows == 0 {
            return (0.0, 1.0);
        }
        let range = self.visible_range();
        // Fractions for scrollbar display only
        #[allow(clippy::cast_precision_loss)]
        let total = self.total_rows as f64;
        #[allow(clippy::cast_precision_loss)]
        {
            (range.start as f64 / total, range.end as f64 / total)
        }
    }

    pub const fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.offset = (self.offset + n).min(self.max_offset());
    }

    /// Put the row at `fraction` of the content at the top.
    pub fn go_to_fraction(&mut self, fraction: f64) {
        let fraction = fraction.clamp(0.0, 1.0);
        // Row count is far below f64 precision limits
        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        let target = (self.total_rows as f64 * fraction).round() as usize;
        self.offset = target.min(self.max_offset());
    }

    /// Scroll the minimum amount that makes `row` visible.
    pub fn ensure_visible(&mut self, row: usize) {
        let height = (self.height as usize).max(1);
        if row < self.offset {
            self.offset = row;
        } else if row >= self.offset + height {
            self.offset = row + 1 - height;
        }
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Update the row count after the content was re-wrapped.
    pub fn set_total_rows(&mut self, total: usize) {
        self.total_rows = total;
        self.offset = self.offset.min(self.max_offset());
    }

    /// The last row at the top.
    const fn max_offset(&self) -> usize {
        self.total_rows.saturating_sub(1)
    }
}
