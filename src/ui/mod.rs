//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`viewport`]: Scroll position and visible range management
//! - [`style`]: Theming and colors
//!
//! The screen is a tab strip on the first row, the active tab's body
//! (gutter, text, scrollbar) in the middle and a status bar on the last row.

pub mod style;
pub mod viewport;

mod render;
mod status;

pub use render::render;

use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

use crate::tabs::{FileTab, Notebook, SCROLLBAR_WIDTH};

/// Where each part of the screen is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub tabs: Rect,
    pub gutter: Rect,
    pub text: Rect,
    pub scrollbar: Rect,
    /// Row the toast covers: the last body row.
    pub toast: Rect,
    pub status: Rect,
}

impl ScreenAreas {
    pub fn new(area: Rect, gutter_width: u16) -> Self {
        let tabs = Rect { height: area.height.min(1), ..area };
        let body_top = area.y + tabs.height;
        let body_height = area.height.saturating_sub(2);
        let status = Rect {
            y: area.y + area.height.saturating_sub(1),
            height: area.height.saturating_sub(tabs.height).min(1),
            ..area
        };
        let gutter_width = gutter_width.min(area.width);
        let scrollbar_width = SCROLLBAR_WIDTH.min(area.width - gutter_width);
        let gutter = Rect::new(area.x, body_top, gutter_width, body_height);
        let scrollbar = Rect::new(
            area.x + area.width - scrollbar_width,
            body_top,
            scrollbar_width,
            body_height,
        );
        let text = Rect::new(
            area.x + gutter_width,
            body_top,
            area.width - gutter_width - scrollbar_width,
            body_height,
        );
        let toast = Rect {
            y: body_top + body_height.saturating_sub(1),
            height: body_height.min(1),
            ..area
        };
        Self {
            tabs,
            gutter,
            text,
            scrollbar,
            toast,
            status,
        }
    }

    /// Areas for the active tab of `notebook` on a screen of `area`.
    pub fn for_notebook(area: Rect, notebook: &Notebook) -> Self {
        let gutter_width = notebook.active().map_or(0, |tab| tab.gutter().width());
        Self::new(area, gutter_width)
    }
}

/// Label of one tab in the strip: modified marker, title and close glyph.
pub fn tab_label(tab: &FileTab, notebook: &Notebook) -> String {
    let style = notebook.style();
    let marker = if tab.is_modified() {
        format!("{} ", style.modified_glyph)
    } else {
        String::new()
    };
    format!(" {marker}{} {} ", tab.title(), style.close_glyph)
}

/// What a click on the tab strip landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabHit {
    /// The title part of a tab's label.
    Title(usize),
    /// The close glyph and the padding after it.
    Close(usize),
}

/// The tab whose label covers column `x` of the strip, and which part of it.
pub fn tab_at_column(notebook: &Notebook, x: u16) -> Option<TabHit> {
    let x = usize::from(x);
    let close_width = notebook.style().close_glyph.width() + 1;
    let mut start = 0;
    for (index, tab) in notebook.tabs().iter().enumerate() {
        if x < start {
            return None;
        }
        let width = tab_label(tab, notebook).width();
        if x < start + width {
            if x >= start + width.saturating_sub(close_width) {
                return Some(TabHit::Close(index));
            }
            return Some(TabHit::Title(index));
        }
        // One separator column between labels.
        start += width + 1;
    }
    None
}

pub(crate) fn contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}
