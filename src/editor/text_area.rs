//! The concrete text widget: a buffer, its marks and a scrolled view of its
//! display rows.

use crate::error::{EditorError, Result};
use crate::ui::viewport::Viewport;

use super::buffer::EditorBuffer;
use super::index::{Index, Mark, TextIndex};
use super::layout::{DisplayRow, Layout, WrapMode, col_at_x, x_of_col};
use super::widget::{Command, DLineInfo, Reply, ScrollUnit, Tag, TextWidget, ViewCommand};

/// An editable, scrollable text area.
///
/// Geometry queries (`@x,y` indices, `dlineinfo`) fail with
/// [`EditorError::GeometryUnavailable`] until [`TextArea::set_area`] has
/// been called once.
#[derive(Debug)]
pub struct TextArea {
    buffer: EditorBuffer,
    insert: TextIndex,
    anchor: TextIndex,
    /// Ordered, non-empty selection.
    selection: Option<(TextIndex, TextIndex)>,
    viewport: Viewport,
    /// Horizontal scroll in cells, used without wrapping.
    xoffset: usize,
    laid_out: bool,
    wrap: WrapMode,
    tab_size: usize,
    layout: Layout,
    layout_stale: bool,
}

impl TextArea {
    pub fn new(text: &str, wrap: WrapMode, tab_size: usize) -> Self {
        Self::from_buffer(EditorBuffer::from_text(text), wrap, tab_size)
    }

    pub fn from_buffer(buffer: EditorBuffer, wrap: WrapMode, tab_size: usize) -> Self {
        Self {
            buffer,
            insert: TextIndex::START,
            anchor: TextIndex::START,
            selection: None,
            viewport: Viewport::new(0, 0, 0),
            xoffset: 0,
            laid_out: false,
            wrap,
            tab_size: tab_size.max(1),
            layout: Layout::default(),
            layout_stale: true,
        }
    }

    /// Give the text area its on-screen size.
    pub fn set_area(&mut self, width: u16, height: u16) {
        if !self.laid_out || self.viewport.width() != width {
            self.layout_stale = true;
        }
        self.laid_out = true;
        self.viewport.resize(width, height);
        self.refresh_layout();
    }

    pub const fn is_laid_out(&self) -> bool {
        self.laid_out
    }

    pub const fn buffer(&self) -> &EditorBuffer {
        &self.buffer
    }

    pub const fn buffer_mut(&mut self) -> &mut EditorBuffer {
        &mut self.buffer
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    pub const fn wrap(&self) -> WrapMode {
        self.wrap
    }

    pub const fn tab_size(&self) -> usize {
        self.tab_size
    }

    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub const fn xoffset(&self) -> usize {
        self.xoffset
    }

    /// The clamped cursor position.
    pub fn insert_index(&self) -> TextIndex {
        self.buffer.clamp(self.insert)
    }

    pub const fn selection_range(&self) -> Option<(TextIndex, TextIndex)> {
        self.selection
    }

    /// Display rows currently on screen, top first.
    pub fn visible_rows(&mut self) -> Vec<DisplayRow> {
        self.refresh_layout();
        self.viewport
            .visible_range()
            .filter_map(|r| self.layout.row(r))
            .collect()
    }

    /// Characters of a logical line.
    pub fn line_chars(&self, line: usize) -> Vec<char> {
        self.buffer
            .line_at(line)
            .unwrap_or_default()
            .chars()
            .collect()
    }

    /// Screen cell of the cursor within the text area, when visible.
    pub fn cursor_cell(&mut self) -> Option<(u16, u16)> {
        self.refresh_layout();
        let idx = self.insert_index();
        let row = self.layout.row_of(idx)?;
        if !self.viewport.visible_range().contains(&row) {
            return None;
        }
        let display = self.layout.row(row)?;
        let x = x_of_col(&self.line_chars(idx.line), display, idx.col, self.tab_size);
        let x = x.checked_sub(self.horizontal_scroll())?;
        Some((
            u16::try_from(x).ok()?,
            u16::try_from(row - self.viewport.offset()).ok()?,
        ))
    }

    /// Horizontal scroll that applies in the current wrap mode.
    pub const fn horizontal_scroll(&self) -> usize {
        match self.wrap {
            WrapMode::None => self.xoffset,
            WrapMode::Char | WrapMode::Word => 0,
        }
    }

    fn refresh_layout(&mut self) {
        if !self.layout_stale {
            return;
        }
        self.layout = Layout::build(&self.buffer, self.viewport.width(), self.wrap, self.tab_size);
        self.viewport.set_total_rows(self.layout.row_count());
        self.layout_stale = false;
    }

    const fn require_geometry(&self) -> Result<()> {
        if self.laid_out {
            Ok(())
        } else {
            Err(EditorError::GeometryUnavailable)
        }
    }

    fn widest_line(&self) -> usize {
        (1..=self.buffer.line_count())
            .map(|line| {
                let chars = self.line_chars(line);
                let row = DisplayRow {
                    line,
                    start: 0,
                    end: chars.len(),
                };
                x_of_col(&chars, row, chars.len(), self.tab_size)
            })
            .max()
            .unwrap_or(0)
    }

    /// Resolve an index expression against the current state.
    ///
    /// Positions past the last line resolve to `end`; columns past a line's
    /// end clamp to it.
    fn resolve(&mut self, index: &Index) -> Result<TextIndex> {
        let count = self.buffer.line_count();
        match index {
            Index::Pos(idx) => {
                if idx.line > count {
                    Ok(self.buffer.end_index())
                } else {
                    Ok(self.buffer.clamp(*idx))
                }
            }
            Index::Mark(Mark::Insert) => Ok(self.buffer.clamp(self.insert)),
            Index::Mark(Mark::Anchor) => Ok(self.buffer.clamp(self.anchor)),
            Index::End => Ok(self.buffer.end_index()),
            Index::At { x, y } => self.resolve_at(usize::from(*x), usize::from(*y)),
            Index::SelFirst => self
                .selection
                .map(|(first, _)| first)
                .ok_or(EditorError::NoSelection),
            Index::SelLast => self
                .selection
                .map(|(_, last)| last)
                .ok_or(EditorError::NoSelection),
            Index::Chars(base, n) => {
                let base = self.resolve(base)?;
                let from = if base.line > count {
                    self.buffer.len_chars() + 1
                } else {
                    self.buffer.char_of(base)
                };
                let target = from.saturating_add_signed(*n);
                if target > self.buffer.len_chars() {
                    Ok(self.buffer.end_index())
                } else {
                    Ok(self.buffer.index_at_char(target))
                }
            }
            Index::Lines(base, n) => {
                let base = self.resolve(base)?;
                let line = base.line.saturating_add_signed(*n).max(1);
                if line > count {
                    return Ok(self.buffer.end_index());
                }
                Ok(TextIndex::new(line, base.col.min(self.buffer.line_len(line))))
            }
            Index::DisplayLines(base, n) => {
                let base = self.resolve(base)?;
                if base.line > count {
                    return Ok(base);
                }
                self.resolve_display_lines(base, *n)
            }
            Index::LineStart(base) => {
                let base = self.resolve(base)?;
                Ok(if base.line > count {
                    base
                } else {
                    TextIndex::new(base.line, 0)
                })
            }
            Index::LineEnd(base) => {
                let base = self.resolve(base)?;
                Ok(if base.line > count {
                    base
                } else {
                    TextIndex::new(base.line, self.buffer.line_len(base.line))
                })
            }
            Index::WordLeft(base) => {
                let base = self.resolve(base)?;
                Ok(self.buffer.word_left(base))
            }
            Index::WordRight(base) => {
                let base = self.resolve(base)?;
                Ok(self.buffer.word_right(base))
            }
        }
    }

    fn resolve_at(&mut self, x: usize, y: usize) -> Result<TextIndex> {
        self.require_geometry()?;
        self.refresh_layout();
        let last = self.layout.row_count().saturating_sub(1);
        let row_no = (self.viewport.offset() + y).min(last);
        let Some(row) = self.layout.row(row_no) else {
            return Ok(TextIndex::START);
        };
        let chars = self.line_chars(row.line);
        let last_row = self.layout.rows_of_line(row.line).end == row_no + 1;
        let col = col_at_x(
            &chars,
            row,
            x + self.horizontal_scroll(),
            last_row,
            self.tab_size,
        );
        Ok(TextIndex::new(row.line, col))
    }

    fn resolve_display_lines(&mut self, base: TextIndex, n: isize) -> Result<TextIndex> {
        if !self.laid_out {
            let line = base.line.saturating_add_signed(n).clamp(1, self.buffer.line_count());
            return Ok(TextIndex::new(line, base.col.min(self.buffer.line_len(line))));
        }
        self.refresh_layout();
        let Some(row_no) = self.layout.row_of(base) else {
            return Ok(base);
        };
        let Some(row) = self.layout.row(row_no) else {
            return Ok(base);
        };
        let x = x_of_col(&self.line_chars(base.line), row, base.col, self.tab_size);
        let last = self.layout.row_count().saturating_sub(1);
        let target_no = row_no.saturating_add_signed(n).min(last);
        let Some(target) = self.layout.row(target_no) else {
            return Ok(base);
        };
        let chars = self.line_chars(target.line);
        let last_row = self.layout.rows_of_line(target.line).end == target_no + 1;
        Ok(TextIndex::new(
            target.line,
            col_at_x(&chars, target, x, last_row, self.tab_size),
        ))
    }

    /// Resolve an index and clamp it onto existing text.
    fn resolve_clamped(&mut self, index: &Index) -> Result<TextIndex> {
        let idx = self.resolve(index)?;
        Ok(self.buffer.clamp(idx))
    }

    fn mark_offsets(&self) -> (usize, usize) {
        (
            self.buffer.char_of(self.insert),
            self.buffer.char_of(self.anchor),
        )
    }

    fn restore_marks(&mut self, insert: usize, anchor: usize) {
        self.insert = self.buffer.index_at_char(insert);
        self.anchor = self.buffer.index_at_char(anchor);
    }

    fn apply_insert(&mut self, at: TextIndex, text: &str) {
        let (insert, anchor) = self.mark_offsets();
        let start = self.buffer.char_of(at);
        let end = self.buffer.insert(at, text);
        let added = self.buffer.char_of(end) - start;
        // The cursor moves with text inserted at it; the anchor stays put.
        let insert = if insert >= start { insert + added } else { insert };
        let anchor = if anchor > start { anchor + added } else { anchor };
        self.restore_marks(insert, anchor);
        self.after_edit();
    }

    fn apply_delete(&mut self, a: TextIndex, b: TextIndex) {
        let (insert, anchor) = self.mark_offsets();
        let start = self.buffer.char_of(a);
        let end = self.buffer.char_of(b);
        if end <= start {
            return;
        }
        self.buffer.delete(a, b);
        let shift = |pos: usize| {
            if pos >= end {
                pos - (end - start)
            } else {
                pos.min(start)
            }
        };
        self.restore_marks(shift(insert), shift(anchor));
        self.after_edit();
    }

    fn apply_replace(&mut self, a: TextIndex, b: TextIndex, text: &str) {
        let (insert, anchor) = self.mark_offsets();
        let start = self.buffer.char_of(a);
        let end = self.buffer.char_of(b).max(start);
        let new_end = self.buffer.replace(a, b, text);
        let added = self.buffer.char_of(new_end) - start;
        let shift = |pos: usize| {
            if pos >= end {
                pos - (end - start) + added
            } else {
                pos.min(start)
            }
        };
        self.restore_marks(shift(insert), shift(anchor));
        self.after_edit();
    }

    fn history_step(&mut self, pos: Option<TextIndex>) -> Reply {
        pos.map_or(Reply::Unit, |pos| {
            self.after_edit();
            Reply::Index(pos)
        })
    }

    fn after_edit(&mut self) {
        self.selection = None;
        self.layout_stale = true;
    }

    fn scroll_view(&mut self, vertical: bool, view: ViewCommand) -> Reply {
        if vertical {
            self.refresh_layout();
        }
        match (vertical, view) {
            (true, ViewCommand::Query) => {
                let (top, bottom) = self.viewport.fractions();
                return Reply::View(top, bottom);
            }
            (true, ViewCommand::MoveTo(fraction)) => self.viewport.go_to_fraction(fraction),
            (true, ViewCommand::Scroll(amount, unit)) => {
                let step = match unit {
                    ScrollUnit::Units => 1,
                    ScrollUnit::Pages => usize::from(self.viewport.height()).max(1),
                };
                let rows = amount.unsigned_abs() * step;
                if amount < 0 {
                    self.viewport.scroll_up(rows);
                } else {
                    self.viewport.scroll_down(rows);
                }
            }
            (false, view) => return self.scroll_horizontal(view),
        }
        Reply::Unit
    }

    fn scroll_horizontal(&mut self, view: ViewCommand) -> Reply {
        let width = usize::from(self.viewport.width());
        let content = if self.wrap == WrapMode::None {
            self.widest_line().max(1)
        } else {
            width.max(1)
        };
        match view {
            ViewCommand::Query => {
                // Fractions for scrollbar display only
                #[allow(clippy::cast_precision_loss)]
                let total = content as f64;
                #[allow(clippy::cast_precision_loss)]
                let left = (self.horizontal_scroll() as f64 / total).min(1.0);
                #[allow(clippy::cast_precision_loss)]
                let right = ((self.horizontal_scroll() + width) as f64 / total).min(1.0);
                return Reply::View(left, right);
            }
            ViewCommand::MoveTo(fraction) if self.wrap == WrapMode::None => {
                #[allow(
                    clippy::cast_precision_loss,
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss
                )]
                let target = (content as f64 * fraction.clamp(0.0, 1.0)).round() as usize;
                self.xoffset = target.min(content.saturating_sub(1));
            }
            ViewCommand::Scroll(amount, unit) if self.wrap == WrapMode::None => {
                let step = match unit {
                    ScrollUnit::Units => 1,
                    ScrollUnit::Pages => width.max(1),
                };
                let cells = amount.unsigned_abs() * step;
                self.xoffset = if amount < 0 {
                    self.xoffset.saturating_sub(cells)
                } else {
                    (self.xoffset + cells).min(content.saturating_sub(1))
                };
            }
            ViewCommand::MoveTo(_) | ViewCommand::Scroll(..) => {}
        }
        Reply::Unit
    }

    fn scroll_into_view(&mut self, idx: TextIndex) {
        self.refresh_layout();
        let idx = self.buffer.clamp(idx);
        let Some(row_no) = self.layout.row_of(idx) else {
            return;
        };
        self.viewport.ensure_visible(row_no);
        if self.wrap != WrapMode::None {
            return;
        }
        let Some(row) = self.layout.row(row_no) else {
            return;
        };
        let x = x_of_col(&self.line_chars(idx.line), row, idx.col, self.tab_size);
        let width = usize::from(self.viewport.width()).max(1);
        if x < self.xoffset {
            self.xoffset = x;
        } else if x >= self.xoffset + width {
            self.xoffset = x + 1 - width;
        }
    }

    fn row_info(&mut self, idx: TextIndex) -> Option<DLineInfo> {
        if idx.line > self.buffer.line_count() {
            return None;
        }
        self.refresh_layout();
        let row_no = self.layout.row_of(idx)?;
        if !self.viewport.visible_range().contains(&row_no) {
            return None;
        }
        let row = self.layout.row(row_no)?;
        let chars = self.line_chars(row.line);
        let cells = x_of_col(&chars, row, row.end, self.tab_size);
        Some(DLineInfo {
            x: 0,
            y: u16::try_from(row_no - self.viewport.offset()).ok()?,
            width: u16::try_from(cells.saturating_sub(self.horizontal_scroll())).unwrap_or(u16::MAX),
            height: 1,
        })
    }
}

impl TextWidget for TextArea {
    fn execute(&mut self, command: Command) -> Result<Reply> {
        match command {
            Command::Insert { index, text } => {
                let at = self.resolve_clamped(&index)?;
                self.apply_insert(at, &text);
            }
            Command::Delete { start, end } => {
                let a = self.resolve_clamped(&start)?;
                let b = match end {
                    Some(end) => self.resolve_clamped(&end)?,
                    None => self.buffer.offset_chars(a, 1),
                };
                self.apply_delete(a, b);
            }
            Command::Replace { start, end, text } => {
                let a = self.resolve_clamped(&start)?;
                let b = self.resolve_clamped(&end)?;
                self.apply_replace(a, b.max(a), &text);
            }
            Command::MarkSet { mark, index } => {
                let idx = self.resolve_clamped(&index)?;
                match mark {
                    Mark::Insert => self.insert = idx,
                    Mark::Anchor => self.anchor = idx,
                }
            }
            Command::Index(index) => return self.resolve(&index).map(Reply::Index),
            Command::Get { start, end } => {
                let a = self.resolve_clamped(&start)?;
                let b = match end {
                    Some(end) => self.resolve_clamped(&end)?,
                    None => self.buffer.offset_chars(a, 1),
                };
                let text = if b <= a {
                    String::new()
                } else {
                    self.buffer.slice(a, b)
                };
                return Ok(Reply::Text(text));
            }
            Command::DLineInfo(index) => {
                self.require_geometry()?;
                let idx = self.resolve(&index)?;
                return Ok(Reply::DLine(self.row_info(idx)));
            }
            Command::XView(view) => return Ok(self.scroll_view(false, view)),
            Command::YView(view) => return Ok(self.scroll_view(true, view)),
            Command::See(index) => {
                let idx = self.resolve(&index)?;
                self.scroll_into_view(idx);
            }
            Command::TagAdd {
                tag: Tag::Sel,
                start,
                end,
            } => {
                let a = self.resolve_clamped(&start)?;
                let b = self.resolve_clamped(&end)?;
                let (first, last) = if a <= b { (a, b) } else { (b, a) };
                self.selection = (first != last).then_some((first, last));
            }
            Command::TagRemove { tag: Tag::Sel, .. } => self.selection = None,
            Command::TagRanges(Tag::Sel) => return Ok(Reply::Range(self.selection)),
            Command::EditUndo => {
                let pos = self.buffer.undo();
                return Ok(self.history_step(pos));
            }
            Command::EditRedo => {
                let pos = self.buffer.redo();
                return Ok(self.history_step(pos));
            }
            Command::EditSeparator => self.buffer.separate_edits(),
            Command::EditModified(None) => return Ok(Reply::Flag(self.buffer.is_dirty())),
            Command::EditModified(Some(flag)) => self.buffer.set_dirty(flag),
        }
        Ok(Reply::Unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::widget::Motion;

    fn idx(line: usize, col: usize) -> TextIndex {
        TextIndex::new(line, col)
    }

    fn area(text: &str) -> TextArea {
        let mut area = TextArea::new(text, WrapMode::Word, 4);
        area.set_area(20, 5);
        area
    }

    #[test]
    fn test_geometry_unavailable_before_layout() {
        let mut area = TextArea::new("abc", WrapMode::Word, 4);
        assert!(matches!(
            area.index(Index::at(0, 0)),
            Err(EditorError::GeometryUnavailable)
        ));
        assert!(matches!(
            area.dline_info(Index::pos(1, 0)),
            Err(EditorError::GeometryUnavailable)
        ));
        area.set_area(10, 3);
        assert_eq!(area.index(Index::at(0, 0)).unwrap(), idx(1, 0));
    }

    #[test]
    fn test_end_and_relative_indices() {
        let mut area = area("abc\ndef");
        assert_eq!(area.index(Index::End).unwrap(), idx(3, 0));
        assert_eq!(area.index(Index::End.chars(-1)).unwrap(), idx(2, 3));
        assert_eq!(area.index(Index::pos(2, 0).lines(1)).unwrap(), idx(3, 0));
        assert_eq!(area.index(Index::pos(1, 2).lines(1)).unwrap(), idx(2, 2));
        assert_eq!(area.index(Index::pos(9, 9)).unwrap(), idx(3, 0));
        assert_eq!(area.index(Index::pos(1, 9)).unwrap(), idx(1, 3));
        assert_eq!(area.line_count().unwrap(), 2);
    }

    #[test]
    fn test_carriage_return_stays_on_its_line() {
        let mut area = area("a\rb");
        assert_eq!(area.line_count().unwrap(), 1);
        area.mark_set(Mark::Insert, Index::pos(1, 0)).unwrap();
        area.move_cursor(Motion::LineEnd).unwrap();
        assert_eq!(area.cursor().unwrap(), idx(1, 3));
        area.type_char('X').unwrap();
        assert_eq!(area.text(), "a\rbX");
        assert_eq!(area.cursor().unwrap(), idx(1, 4));
    }

    #[test]
    fn test_form_feed_and_unicode_separators_are_not_line_breaks() {
        let mut area = area("a\x0cb\u{2028}c");
        assert_eq!(area.line_count().unwrap(), 1);
        assert_eq!(area.index(Index::End).unwrap(), idx(2, 0));
        assert_eq!(area.index(Index::pos(1, 0).line_end()).unwrap(), idx(1, 5));
    }

    #[test]
    fn test_typing_moves_cursor() {
        let mut area = area("");
        area.type_char('h').unwrap();
        area.type_char('i').unwrap();
        assert_eq!(area.text(), "hi");
        assert_eq!(area.cursor().unwrap(), idx(1, 2));
        area.newline().unwrap();
        assert_eq!(area.cursor().unwrap(), idx(2, 0));
    }

    #[test]
    fn test_insert_before_cursor_shifts_it() {
        let mut area = area("world");
        area.mark_set(Mark::Insert, Index::pos(1, 5)).unwrap();
        area.insert(Index::pos(1, 0), "hello ").unwrap();
        assert_eq!(area.cursor().unwrap(), idx(1, 11));
    }

    #[test]
    fn test_delete_range_pulls_cursor_back() {
        let mut area = area("hello world");
        area.mark_set(Mark::Insert, Index::pos(1, 8)).unwrap();
        area.delete(Index::pos(1, 5), Some(Index::End)).unwrap();
        assert_eq!(area.text(), "hello");
        assert_eq!(area.cursor().unwrap(), idx(1, 5));
    }

    #[test]
    fn test_backspace_joins_lines() {
        let mut area = area("ab\ncd");
        area.mark_set(Mark::Insert, Index::pos(2, 0)).unwrap();
        area.backspace().unwrap();
        assert_eq!(area.text(), "abcd");
        assert_eq!(area.cursor().unwrap(), idx(1, 2));
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut area = area("ab");
        area.backspace().unwrap();
        assert_eq!(area.text(), "ab");
    }

    #[test]
    fn test_delete_forward_at_end_is_noop() {
        let mut area = area("ab");
        area.mark_set(Mark::Insert, Index::End).unwrap();
        area.delete_forward().unwrap();
        assert_eq!(area.text(), "ab");
    }

    #[test]
    fn test_copy_without_selection_fails() {
        let mut area = area("abc");
        assert!(matches!(area.copy(), Err(EditorError::NoSelection)));
    }

    #[test]
    fn test_select_all_copy_and_cut() {
        let mut area = area("abc\ndef");
        area.select_all().unwrap();
        assert_eq!(area.copy().unwrap().as_deref(), Some("abc\ndef"));
        assert_eq!(area.cut().unwrap().as_deref(), Some("abc\ndef"));
        assert_eq!(area.text(), "");
        assert!(!area.has_selection().unwrap());
    }

    #[test]
    fn test_typing_replaces_selection() {
        let mut area = area("hello world");
        area.execute(Command::TagAdd {
            tag: Tag::Sel,
            start: Index::pos(1, 6),
            end: Index::pos(1, 11),
        })
        .unwrap();
        area.mark_set(Mark::Insert, Index::pos(1, 11)).unwrap();
        area.type_text("there").unwrap();
        assert_eq!(area.text(), "hello there");
    }

    #[test]
    fn test_extend_selection_from_anchor() {
        let mut area = area("hello");
        area.move_cursor(Motion::Right).unwrap();
        area.extend_selection(Motion::Right).unwrap();
        area.extend_selection(Motion::Right).unwrap();
        assert_eq!(area.selection().unwrap(), Some((idx(1, 1), idx(1, 3))));
        area.extend_selection(Motion::LineStart).unwrap();
        assert_eq!(area.selection().unwrap(), Some((idx(1, 0), idx(1, 1))));
    }

    #[test]
    fn test_motion_clears_selection() {
        let mut area = area("hello");
        area.select_all().unwrap();
        area.move_cursor(Motion::LineEnd).unwrap();
        assert!(!area.has_selection().unwrap());
        assert_eq!(area.cursor().unwrap(), idx(1, 5));
    }

    #[test]
    fn test_up_and_down_follow_wrapped_rows() {
        let mut area = TextArea::new("abcdefghij\nxy", WrapMode::Char, 4);
        area.set_area(4, 5);
        area.mark_set(Mark::Insert, Index::pos(1, 1)).unwrap();
        area.move_cursor(Motion::Down).unwrap();
        assert_eq!(area.cursor().unwrap(), idx(1, 5));
        area.move_cursor(Motion::Down).unwrap();
        area.move_cursor(Motion::Down).unwrap();
        assert_eq!(area.cursor().unwrap(), idx(2, 1));
        area.move_cursor(Motion::Up).unwrap();
        assert_eq!(area.cursor().unwrap(), idx(1, 9));
    }

    #[test]
    fn test_undo_restores_text_and_cursor() {
        let mut area = area("abc");
        area.mark_set(Mark::Insert, Index::End).unwrap();
        area.type_text("def").unwrap();
        area.undo().unwrap();
        assert_eq!(area.text(), "abc");
        assert_eq!(area.cursor().unwrap(), idx(1, 3));
        area.redo().unwrap();
        assert_eq!(area.text(), "abcdef");
        assert_eq!(area.cursor().unwrap(), idx(1, 6));
    }

    #[test]
    fn test_replace_keeps_marks_consistent() {
        let mut area = area("one two three");
        area.mark_set(Mark::Insert, Index::End).unwrap();
        area.replace(Index::pos(1, 4), Index::pos(1, 7), "2").unwrap();
        assert_eq!(area.text(), "one 2 three");
        assert_eq!(area.cursor().unwrap(), idx(1, 11));
    }

    #[test]
    fn test_see_scrolls_cursor_into_view() {
        let text = (1..=20).map(|n| n.to_string()).collect::<Vec<_>>().join("\n");
        let mut area = area(&text);
        area.mark_set(Mark::Insert, Index::pos(12, 0)).unwrap();
        area.see(Index::insert()).unwrap();
        assert_eq!(area.viewport().offset(), 7);
        assert_eq!(area.index(Index::at(0, 0)).unwrap(), idx(8, 0));
    }

    #[test]
    fn test_dline_info_only_for_visible_rows() {
        let text = (1..=20).map(|n| n.to_string()).collect::<Vec<_>>().join("\n");
        let mut area = area(&text);
        let info = area.dline_info(Index::pos(3, 0)).unwrap().unwrap();
        assert_eq!((info.y, info.height), (2, 1));
        assert_eq!(area.dline_info(Index::pos(10, 0)).unwrap(), None);
        assert_eq!(area.dline_info(Index::End).unwrap(), None);
    }

    #[test]
    fn test_yview_scroll_and_query() {
        let text = (1..=20).map(|n| n.to_string()).collect::<Vec<_>>().join("\n");
        let mut area = area(&text);
        area.yview_scroll(1, ScrollUnit::Pages).unwrap();
        assert_eq!(area.yview().unwrap(), (0.25, 0.5));
        area.yview_moveto(0.0).unwrap();
        assert_eq!(area.viewport().offset(), 0);
    }

    #[test]
    fn test_horizontal_scroll_without_wrap() {
        let mut area = TextArea::new("0123456789abcdefghij", WrapMode::None, 4);
        area.set_area(5, 2);
        area.mark_set(Mark::Insert, Index::pos(1, 12)).unwrap();
        area.see(Index::insert()).unwrap();
        assert_eq!(area.xoffset(), 8);
        assert_eq!(area.cursor_cell(), Some((4, 0)));
        area.xview_scroll(-100, ScrollUnit::Units).unwrap();
        assert_eq!(area.xoffset(), 0);
    }

    #[test]
    fn test_modified_flag() {
        let mut area = area("abc");
        assert!(!area.is_modified().unwrap());
        area.type_char('x').unwrap();
        assert!(area.is_modified().unwrap());
        area.set_modified(false).unwrap();
        assert!(!area.is_modified().unwrap());
    }
}
