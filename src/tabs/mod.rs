//! The tab container.
//!
//! A [`Notebook`] owns every open [`FileTab`] and which one is active.
//! Only the active tab is shown; the others keep their state but are out of
//! the layout until selected again.

mod file_tab;

pub use file_tab::{FileTab, SCROLLBAR_WIDTH, TabId, TabOptions};

use std::path::Path;

use tracing::{debug, warn};

use crate::error::{EditorError, Result};
use crate::ui::style::NotebookStyle;

/// Open tabs and the active one.
#[derive(Debug)]
pub struct Notebook {
    tabs: Vec<FileTab>,
    active: Option<usize>,
    next_id: u64,
    options: TabOptions,
    style: NotebookStyle,
    body: Option<(u16, u16)>,
}

impl Notebook {
    pub const fn new(style: NotebookStyle, options: TabOptions) -> Self {
        Self {
            tabs: Vec::new(),
            active: None,
            next_id: 0,
            options,
            style,
            body: None,
        }
    }

    pub const fn style(&self) -> &NotebookStyle {
        &self.style
    }

    pub const fn options(&self) -> TabOptions {
        self.options
    }

    pub const fn len(&self) -> usize {
        self.tabs.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn tabs(&self) -> &[FileTab] {
        &self.tabs
    }

    pub const fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active(&self) -> Option<&FileTab> {
        self.tabs.get(self.active?)
    }

    pub fn active_mut(&mut self) -> Option<&mut FileTab> {
        self.tabs.get_mut(self.active?)
    }

    pub fn index_of(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.id() == id)
    }

    pub fn tab_mut(&mut self, id: TabId) -> Option<&mut FileTab> {
        self.tabs.iter_mut().find(|tab| tab.id() == id)
    }

    /// Whether any tab has unsaved changes.
    pub fn any_modified(&self) -> bool {
        self.tabs.iter().any(FileTab::is_modified)
    }

    /// Open inline text in a new, active tab.
    pub fn open_text(&mut self, title: &str, text: &str) -> TabId {
        let id = self.allocate_id();
        self.push(FileTab::new(id, title.to_string(), None, text, self.options))
    }

    /// Read a file as UTF-8 into a new, active tab.
    ///
    /// Nothing is opened when the read fails.
    pub fn open_file(&mut self, path: &Path) -> Result<TabId> {
        let text = std::fs::read_to_string(path).map_err(|source| {
            warn!(path = %path.display(), %source, "open failed");
            EditorError::FileRead {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let title = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().to_string());
        let id = self.allocate_id();
        let tab = FileTab::new(
            id,
            title,
            Some(path.to_path_buf()),
            &text,
            self.options,
        );
        Ok(self.push(tab))
    }

    /// Make the tab at `index` active.
    ///
    /// The previous tab is hidden and the new one shown and laid out.
    /// Returns `false` for an index out of range.
    pub fn select(&mut self, index: usize) -> Result<bool> {
        if index >= self.tabs.len() {
            return Ok(false);
        }
        if let Some(previous) = self.active.and_then(|i| self.tabs.get_mut(i)) {
            previous.hide();
        }
        self.active = Some(index);
        let body = self.body;
        self.tabs[index].show(body)?;
        Ok(true)
    }

    pub fn select_next(&mut self) -> Result<bool> {
        match self.active {
            Some(i) if !self.tabs.is_empty() => self.select((i + 1) % self.tabs.len()),
            _ => Ok(false),
        }
    }

    pub fn select_prev(&mut self) -> Result<bool> {
        match self.active {
            Some(i) if !self.tabs.is_empty() => {
                self.select((i + self.tabs.len() - 1) % self.tabs.len())
            }
            _ => Ok(false),
        }
    }

    /// Close the tab at `index`.
    ///
    /// Closing the active tab selects the one before it, or the new first
    /// tab when the first was closed, or nothing when none remain.
    pub fn close(&mut self, index: usize) -> Result<Option<FileTab>> {
        if index >= self.tabs.len() {
            return Ok(None);
        }
        let mut closed = self.tabs.remove(index);
        closed.hide();
        debug!(title = closed.title(), "closed tab");

        let active = self.active;
        match active {
            _ if self.tabs.is_empty() => self.active = None,
            Some(active) if active == index => {
                self.active = None;
                self.select(index.saturating_sub(1))?;
            }
            Some(active) if active > index => self.active = Some(active - 1),
            _ => {}
        }
        Ok(Some(closed))
    }

    /// Size of the area holding gutter, text and scrollbar.
    pub fn set_body(&mut self, width: u16, height: u16) -> Result<()> {
        self.body = Some((width, height));
        match self.active_mut() {
            Some(tab) => tab.configure(width, height),
            None => Ok(()),
        }
    }

    pub const fn body(&self) -> Option<(u16, u16)> {
        self.body
    }

    const fn allocate_id(&mut self) -> TabId {
        let id = TabId(self.next_id);
        self.next_id += 1;
        id
    }

    fn push(&mut self, tab: FileTab) -> TabId {
        let id = tab.id();
        debug!(title = tab.title(), "opened tab");
        self.tabs.push(tab);
        let index = self.tabs.len() - 1;
        if let Err(err) = self.select(index) {
            warn!(%err, "new tab could not be laid out");
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{Index, Mark, TextIndex, TextWidget};
    use crate::gutter::{EditKey, GutterMode};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn notebook() -> Notebook {
        let mut nb = Notebook::new(NotebookStyle::default(), TabOptions::default());
        nb.set_body(40, 10).unwrap();
        nb
    }

    fn titles(nb: &Notebook) -> Vec<&str> {
        nb.tabs().iter().map(FileTab::title).collect()
    }

    #[test]
    fn test_open_text_becomes_active() {
        let mut nb = notebook();
        let first = nb.open_text("one", "a");
        let second = nb.open_text("two", "b");
        assert_ne!(first, second);
        assert_eq!(nb.active_index(), Some(1));
        assert!(nb.tabs()[1].is_shown());
        assert!(!nb.tabs()[0].is_shown());
    }

    #[test]
    fn test_open_file_reads_content() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "line1\nline2\nline3").unwrap();
        let mut nb = notebook();
        nb.open_file(file.path()).unwrap();

        let tab = nb.active_mut().unwrap();
        assert_eq!(tab.path(), Some(file.path()));
        let w = tab.widget();
        assert_eq!(w.line_count().unwrap(), 3);
        assert_eq!(w.cursor().unwrap(), TextIndex::new(1, 0));
        assert!(!tab.is_modified());
    }

    #[test]
    fn test_open_missing_file_creates_no_tab() {
        let mut nb = notebook();
        nb.open_text("keep", "x");
        let err = nb.open_file(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, EditorError::FileRead { .. }));
        assert_eq!(nb.len(), 1);
        assert_eq!(nb.active_index(), Some(0));
    }

    #[test]
    fn test_open_non_utf8_file_fails() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0x00, 0x80]).unwrap();
        let mut nb = notebook();
        assert!(matches!(
            nb.open_file(file.path()),
            Err(EditorError::FileRead { .. })
        ));
        assert!(nb.is_empty());
    }

    #[test]
    fn test_select_hides_previous() {
        let mut nb = notebook();
        nb.open_text("a", "");
        nb.open_text("b", "");
        assert!(nb.select(0).unwrap());
        assert!(nb.tabs()[0].is_shown());
        assert!(!nb.tabs()[1].is_shown());
        assert!(!nb.select(5).unwrap());
        assert_eq!(nb.active_index(), Some(0));
    }

    #[test]
    fn test_close_active_selects_previous() {
        let mut nb = notebook();
        nb.open_text("a", "");
        nb.open_text("b", "");
        nb.open_text("c", "");
        let closed = nb.close(2).unwrap().unwrap();
        assert_eq!(closed.title(), "c");
        assert!(!closed.is_shown());
        assert_eq!(nb.active_index(), Some(1));
        assert!(nb.tabs()[1].is_shown());
    }

    #[test]
    fn test_close_first_active_selects_new_first() {
        let mut nb = notebook();
        nb.open_text("a", "");
        nb.open_text("b", "");
        nb.select(0).unwrap();
        nb.close(0).unwrap();
        assert_eq!(titles(&nb), vec!["b"]);
        assert_eq!(nb.active_index(), Some(0));
        assert!(nb.tabs()[0].is_shown());
    }

    #[test]
    fn test_close_last_tab_leaves_none() {
        let mut nb = notebook();
        nb.open_text("a", "");
        nb.close(0).unwrap();
        assert!(nb.is_empty());
        assert_eq!(nb.active_index(), None);
        assert!(nb.active().is_none());
    }

    #[test]
    fn test_close_inactive_keeps_active_tab() {
        let mut nb = notebook();
        let a = nb.open_text("a", "");
        nb.open_text("b", "");
        let c = nb.open_text("c", "");
        nb.close(0).unwrap();
        assert_eq!(nb.active().map(FileTab::id), Some(c));
        assert_eq!(nb.index_of(a), None);
        assert_eq!(nb.index_of(c), Some(1));
    }

    #[test]
    fn test_next_and_prev_wrap_around() {
        let mut nb = notebook();
        nb.open_text("a", "");
        nb.open_text("b", "");
        nb.select_next().unwrap();
        assert_eq!(nb.active_index(), Some(0));
        nb.select_prev().unwrap();
        assert_eq!(nb.active_index(), Some(1));
    }

    #[test]
    fn test_tab_layout_leaves_room_for_gutter_and_scrollbar() {
        let mut nb = notebook();
        nb.open_text("a", "hello");
        let tab = nb.active().unwrap();
        let expected = 40 - tab.gutter().width() - SCROLLBAR_WIDTH;
        assert_eq!(tab.text_area().viewport().width(), expected);
        assert_eq!(tab.gutter().labels().len(), 1);
    }

    #[test]
    fn test_gutter_widens_when_lines_pass_ten() {
        let mut nb = notebook();
        nb.open_text("a", "1\n2\n3\n4\n5\n6\n7\n8\n9");
        let tab = nb.active_mut().unwrap();
        assert_eq!(tab.gutter().width(), 2);
        tab.widget().mark_set(Mark::Insert, Index::End).unwrap();
        tab.widget().newline().unwrap();
        assert!(tab.take_change());
        tab.refresh().unwrap();
        assert_eq!(tab.gutter().width(), 3);
        assert_eq!(tab.text_area().viewport().width(), 40 - 3 - SCROLLBAR_WIDTH);
    }

    #[test]
    fn test_line_count_tabs_sync_before_key() {
        let mut nb = Notebook::new(
            NotebookStyle::default(),
            TabOptions {
                gutter: GutterMode::LineCount,
                ..TabOptions::default()
            },
        );
        nb.set_body(40, 10).unwrap();
        nb.open_text("a", "x");
        let tab = nb.active_mut().unwrap();
        assert_eq!(tab.gutter().text_lines(), ["1"]);
        tab.before_key(EditKey::Enter).unwrap();
        tab.widget().newline().unwrap();
        assert_eq!(tab.gutter().text_lines(), ["1", "2"]);
    }

    #[test]
    fn test_save_writes_and_clears_modified() {
        let file = NamedTempFile::new().unwrap();
        let mut nb = notebook();
        nb.open_file(file.path()).unwrap();
        let tab = nb.active_mut().unwrap();
        tab.widget().type_text("saved text").unwrap();
        assert!(tab.is_modified());
        assert_eq!(tab.save().unwrap().as_deref(), Some(file.path()));
        assert!(!tab.is_modified());
        assert_eq!(std::fs::read_to_string(file.path()).unwrap(), "saved text");
    }

    #[test]
    fn test_save_without_path_is_none() {
        let mut nb = notebook();
        nb.open_text("untitled", "x");
        assert_eq!(nb.active_mut().unwrap().save().unwrap(), None);
    }

    #[test]
    fn test_tabs_opened_before_layout_get_laid_out_on_body() {
        let mut nb = Notebook::new(NotebookStyle::default(), TabOptions::default());
        nb.open_text("a", "abc");
        assert!(!nb.active().unwrap().text_area().is_laid_out());
        nb.set_body(30, 5).unwrap();
        assert!(nb.active().unwrap().text_area().is_laid_out());
        assert_eq!(nb.active().unwrap().gutter().labels().len(), 1);
    }
}
