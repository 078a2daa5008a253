use std::path::{Path, PathBuf};

use tracing::debug;

use crate::editor::{ChangeDetector, TextArea, TextWidget, WrapMode};
use crate::error::{EditorError, Result};
use crate::gutter::{EditKey, GutterMode, LineGutter};

/// Identifies a tab for as long as it is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabId(pub(super) u64);

/// Settings every new tab is created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabOptions {
    pub wrap: WrapMode,
    pub tab_size: usize,
    pub gutter: GutterMode,
}

impl Default for TabOptions {
    fn default() -> Self {
        Self {
            wrap: WrapMode::Word,
            tab_size: 4,
            gutter: GutterMode::Viewport,
        }
    }
}

/// Columns taken by the scrollbar to the right of the text.
pub const SCROLLBAR_WIDTH: u16 = 1;

/// One open document: its text area, gutter, scrollbar and title.
#[derive(Debug)]
pub struct FileTab {
    id: TabId,
    title: String,
    path: Option<PathBuf>,
    text: ChangeDetector<TextArea>,
    gutter: LineGutter,
    /// Visible fractions, as the scrollbar shows them.
    scrollbar: (f64, f64),
    shown: bool,
    /// Body size (gutter, text and scrollbar) last given to this tab.
    body: Option<(u16, u16)>,
}

impl FileTab {
    pub(super) fn new(id: TabId, title: String, path: Option<PathBuf>, text: &str, options: TabOptions) -> Self {
        Self {
            id,
            title,
            path,
            text: ChangeDetector::new(TextArea::new(text, options.wrap, options.tab_size)),
            gutter: LineGutter::new(options.gutter),
            scrollbar: (0.0, 1.0),
            shown: false,
            body: None,
        }
    }

    pub const fn id(&self) -> TabId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether this tab's widgets are part of the layout.
    pub const fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn is_modified(&self) -> bool {
        self.text.inner().buffer().is_dirty()
    }

    /// The text widget, observed by the change detector.
    pub const fn widget(&mut self) -> &mut ChangeDetector<TextArea> {
        &mut self.text
    }

    pub const fn text_area(&self) -> &TextArea {
        self.text.inner()
    }

    pub const fn text_area_mut(&mut self) -> &mut TextArea {
        self.text.inner_mut()
    }

    pub const fn gutter(&self) -> &LineGutter {
        &self.gutter
    }

    pub const fn scrollbar(&self) -> (f64, f64) {
        self.scrollbar
    }

    /// Return and clear the change detector's pending flag.
    pub const fn take_change(&mut self) -> bool {
        self.text.take_change()
    }

    pub(super) fn show(&mut self, body: Option<(u16, u16)>) -> Result<()> {
        self.shown = true;
        match body {
            Some((width, height)) => self.configure(width, height),
            None => Ok(()),
        }
    }

    pub(super) const fn hide(&mut self) {
        self.shown = false;
    }

    /// Lay the tab out in a body of the given size and redraw the gutter.
    pub fn configure(&mut self, width: u16, height: u16) -> Result<()> {
        self.body = Some((width, height));
        self.apply_body();
        self.gutter.on_configure(&mut self.text)?;
        self.settle_gutter_width()?;
        self.sync_scrollbar()
    }

    /// Bring gutter and scrollbar up to date after a change notification.
    pub fn refresh(&mut self) -> Result<()> {
        self.gutter.on_change(&mut self.text)?;
        self.settle_gutter_width()?;
        self.sync_scrollbar()
    }

    /// Let the gutter see an editing key before it is applied.
    pub fn before_key(&mut self, key: EditKey) -> Result<()> {
        self.gutter.before_key(&mut self.text, key)?;
        self.settle_gutter_width()
    }

    /// Write the buffer to its path. Returns the path, or `None` for a tab
    /// that was never saved.
    pub fn save(&mut self) -> Result<Option<PathBuf>> {
        let Some(path) = self.path.clone() else {
            return Ok(None);
        };
        let contents = self.text.inner().buffer().text_for_disk();
        std::fs::write(&path, contents).map_err(|source| EditorError::FileWrite {
            path: path.clone(),
            source,
        })?;
        self.text.set_modified(false)?;
        debug!(path = %path.display(), "saved");
        Ok(Some(path))
    }

    fn text_width(&self, body_width: u16) -> u16 {
        body_width
            .saturating_sub(self.gutter.width())
            .saturating_sub(SCROLLBAR_WIDTH)
            .max(1)
    }

    fn apply_body(&mut self) {
        if let Some((width, height)) = self.body {
            let text_width = self.text_width(width);
            self.text.inner_mut().set_area(text_width, height);
        }
    }

    /// A gutter that changed width narrows or widens the text; lay out again.
    fn settle_gutter_width(&mut self) -> Result<()> {
        let Some((width, _)) = self.body else {
            return Ok(());
        };
        if self.text.inner().viewport().width() == self.text_width(width) {
            return Ok(());
        }
        self.apply_body();
        self.gutter.on_change(&mut self.text)
    }

    fn sync_scrollbar(&mut self) -> Result<()> {
        self.scrollbar = self.text.yview()?;
        Ok(())
    }
}
