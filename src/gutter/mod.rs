//! The line-number gutter.
//!
//! Two strategies keep the numbers in step with the text area:
//!
//! - [`GutterMode::Viewport`] redraws on every change notification by
//!   walking the rendered display rows ([`redraw_viewport`]).
//! - [`GutterMode::LineCount`] rebuilds a `1..N` column only when a key
//!   adds or removes a line ([`sync_line_count`]).
//!
//! Both draw onto a [`GutterSurface`]; [`LineGutter`] is the one the
//! terminal UI renders.

mod sync;

pub use sync::{
    EditKey, StructuralEdit, label_width, redraw_viewport, structural_edit, sync_line_count,
};

use crate::editor::TextWidget;
use crate::error::Result;

/// A surface line numbers are drawn on.
pub trait GutterSurface {
    /// Remove everything drawn with [`GutterSurface::draw_at`].
    fn clear(&mut self);
    /// Draw a label at a row of the text area.
    fn draw_at(&mut self, row: u16, label: &str);
    /// Replace the surface's text content, one label per line.
    fn set_text(&mut self, text: &str);
    /// Resize the surface, in columns.
    fn set_width(&mut self, cols: u16);
}

/// Which synchronization strategy a gutter uses.
#[derive(clap::ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum GutterMode {
    /// Redraw from the rendered rows after every change.
    #[default]
    Viewport,
    /// Rebuild `1..N` when a line is added or removed.
    LineCount,
}

/// The gutter drawn beside each tab's text area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineGutter {
    mode: GutterMode,
    labels: Vec<(u16, String)>,
    text: Vec<String>,
    width: u16,
}

impl LineGutter {
    pub fn new(mode: GutterMode) -> Self {
        Self {
            mode,
            labels: Vec::new(),
            text: Vec::new(),
            width: label_width(1),
        }
    }

    pub const fn mode(&self) -> GutterMode {
        self.mode
    }

    /// Labels placed by row, in drawing order.
    pub fn labels(&self) -> &[(u16, String)] {
        &self.labels
    }

    /// Text content set by the line-count strategy.
    pub fn text_lines(&self) -> &[String] {
        &self.text
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    /// The label for each of `height` rows.
    ///
    /// `top_line` is the logical line shown on the first row; the line-count
    /// column scrolls with it and ignores wrapping.
    pub fn row_labels(&self, height: u16, top_line: usize) -> Vec<Option<&str>> {
        match self.mode {
            GutterMode::Viewport => {
                let mut rows = vec![None; usize::from(height)];
                for (row, label) in &self.labels {
                    if let Some(slot) = rows.get_mut(usize::from(*row)) {
                        *slot = Some(label.as_str());
                    }
                }
                rows
            }
            GutterMode::LineCount => {
                let skip = top_line.saturating_sub(1);
                (0..usize::from(height))
                    .map(|r| self.text.get(skip + r).map(String::as_str))
                    .collect()
            }
        }
    }

    /// React to a change notification from the text area.
    pub fn on_change<W: TextWidget + ?Sized>(&mut self, widget: &mut W) -> Result<()> {
        if self.mode == GutterMode::Viewport {
            redraw_viewport(widget, self)?;
        }
        Ok(())
    }

    /// Recompute from scratch after the text area was laid out or resized.
    pub fn on_configure<W: TextWidget + ?Sized>(&mut self, widget: &mut W) -> Result<()> {
        match self.mode {
            GutterMode::Viewport => redraw_viewport(widget, self).map(drop),
            GutterMode::LineCount => sync_line_count(widget, self, None).map(drop),
        }
    }

    /// React to an editing key before its edit is applied.
    pub fn before_key<W: TextWidget + ?Sized>(&mut self, widget: &mut W, key: EditKey) -> Result<()> {
        if self.mode != GutterMode::LineCount {
            return Ok(());
        }
        if let Some(edit) = structural_edit(widget, key)? {
            sync_line_count(widget, self, Some(edit))?;
        }
        Ok(())
    }
}

impl GutterSurface for LineGutter {
    fn clear(&mut self) {
        self.labels.clear();
    }

    fn draw_at(&mut self, row: u16, label: &str) {
        self.labels.push((row, label.to_string()));
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.lines().map(str::to_string).collect();
    }

    fn set_width(&mut self, cols: u16) {
        self.width = cols;
    }
}
