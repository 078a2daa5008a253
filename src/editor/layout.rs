//! Soft-wrap layout: splits logical lines into display rows.

use std::ops::Range;

use unicode_width::UnicodeWidthChar;

use super::buffer::EditorBuffer;
use super::index::TextIndex;

/// How long lines are folded onto display rows.
#[derive(clap::ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    /// Never wrap; long lines scroll horizontally.
    None,
    /// Break at the column limit.
    Char,
    /// Break after whitespace when possible.
    #[default]
    Word,
}

/// One rendered row: the characters `start..end` of logical line `line`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayRow {
    pub line: usize,
    pub start: usize,
    pub end: usize,
}

/// Display rows for a whole buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    rows: Vec<DisplayRow>,
    /// Index into `rows` of each line's first row (line 1 at position 0).
    first_row: Vec<usize>,
}

impl Layout {
    pub fn build(buffer: &EditorBuffer, width: u16, mode: WrapMode, tab_size: usize) -> Self {
        let mut rows = Vec::with_capacity(buffer.line_count());
        let mut first_row = Vec::with_capacity(buffer.line_count());
        for line in 1..=buffer.line_count() {
            first_row.push(rows.len());
            let chars: Vec<char> = buffer.line_at(line).unwrap_or_default().chars().collect();
            for range in wrap_line(&chars, width, mode, tab_size) {
                rows.push(DisplayRow {
                    line,
                    start: range.start,
                    end: range.end,
                });
            }
        }
        Self { rows, first_row }
    }

    pub const fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, n: usize) -> Option<DisplayRow> {
        self.rows.get(n).copied()
    }

    pub fn rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    /// Rows occupied by a logical line.
    pub fn rows_of_line(&self, line: usize) -> Range<usize> {
        let Some(&start) = line.checked_sub(1).and_then(|i| self.first_row.get(i)) else {
            return 0..0;
        };
        let end = self.first_row.get(line).copied().unwrap_or(self.rows.len());
        start..end
    }

    /// The row a position is drawn on.
    ///
    /// A column equal to a wrapped row's end belongs to the following row;
    /// only the last row of a line owns the end-of-line position.
    pub fn row_of(&self, idx: TextIndex) -> Option<usize> {
        let range = self.rows_of_line(idx.line);
        if range.is_empty() {
            return None;
        }
        let last = range.end - 1;
        range
            .clone()
            .find(|&r| idx.col < self.rows[r].end)
            .or(Some(last))
    }
}

/// Cells a character occupies when it starts at cell `cells` of a row.
pub fn char_cells(c: char, cells: usize, tab_size: usize) -> usize {
    if c == '\t' {
        let tab = tab_size.max(1);
        tab - cells % tab
    } else {
        c.width().unwrap_or(0)
    }
}

/// Split a line into row character ranges.
pub fn wrap_line(chars: &[char], width: u16, mode: WrapMode, tab_size: usize) -> Vec<Range<usize>> {
    let width = usize::from(width);
    if mode == WrapMode::None || width == 0 || chars.is_empty() {
        return vec![0..chars.len()];
    }

    let mut rows = Vec::new();
    let mut row_start = 0;
    let mut cells = 0;
    let mut last_break: Option<usize> = None;
    let mut i = 0;
    while i < chars.len() {
        let w = char_cells(chars[i], cells, tab_size);
        if cells + w > width && i > row_start {
            let brk = match (mode, last_break) {
                (WrapMode::Word, Some(b)) if b > row_start && b <= i => b,
                _ => i,
            };
            rows.push(row_start..brk);
            row_start = brk;
            i = brk;
            cells = 0;
            last_break = None;
            continue;
        }
        cells += w;
        if mode == WrapMode::Word && chars[i].is_whitespace() {
            last_break = Some(i + 1);
        }
        i += 1;
    }
    rows.push(row_start..chars.len());
    rows
}

/// Column of the character under cell `x` of a row.
pub fn col_at_x(chars: &[char], row: DisplayRow, x: usize, last_row: bool, tab_size: usize) -> usize {
    let mut cells = 0;
    for col in row.start..row.end.min(chars.len()) {
        let w = char_cells(chars[col], cells, tab_size);
        if cells + w > x {
            return col;
        }
        cells += w;
    }
    if last_row || row.end == row.start {
        row.end
    } else {
        row.end - 1
    }
}

/// Cell offset of column `col` within its row.
pub fn x_of_col(chars: &[char], row: DisplayRow, col: usize, tab_size: usize) -> usize {
    let mut cells = 0;
    for c in chars.iter().take(col.min(row.end)).skip(row.start) {
        cells += char_cells(*c, cells, tab_size);
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_short_line_is_one_row() {
        assert_eq!(wrap_line(&chars("hello"), 10, WrapMode::Word, 4), vec![0..5]);
    }

    #[test]
    fn test_empty_line_still_gets_a_row() {
        assert_eq!(wrap_line(&[], 10, WrapMode::Char, 4), vec![0..0]);
    }

    #[test]
    fn test_char_wrap_breaks_at_width() {
        assert_eq!(
            wrap_line(&chars("abcdefghij"), 4, WrapMode::Char, 4),
            vec![0..4, 4..8, 8..10]
        );
    }

    #[test]
    fn test_word_wrap_breaks_after_space() {
        // "hello " fits, "world" moves down whole.
        assert_eq!(
            wrap_line(&chars("hello world"), 8, WrapMode::Word, 4),
            vec![0..6, 6..11]
        );
    }

    #[test]
    fn test_word_wrap_falls_back_to_hard_break() {
        assert_eq!(
            wrap_line(&chars("abcdefghij"), 4, WrapMode::Word, 4),
            vec![0..4, 4..8, 8..10]
        );
    }

    #[test]
    fn test_no_wrap_keeps_one_row() {
        assert_eq!(wrap_line(&chars("abcdefghij"), 4, WrapMode::None, 4), vec![0..10]);
    }

    #[test]
    fn test_wide_chars_take_two_cells() {
        assert_eq!(wrap_line(&chars("日本語"), 4, WrapMode::Char, 4), vec![0..2, 2..3]);
    }

    #[test]
    fn test_tab_expands_to_stop() {
        assert_eq!(char_cells('\t', 0, 4), 4);
        assert_eq!(char_cells('\t', 1, 4), 3);
        assert_eq!(char_cells('\t', 4, 4), 4);
    }

    #[test]
    fn test_layout_tracks_line_rows() {
        let buf = EditorBuffer::from_text("short\nabcdefghij\n");
        let layout = Layout::build(&buf, 4, WrapMode::Char, 4);
        // "short" -> 2 rows, "abcdefghij" -> 3 rows, "" -> 1 row
        assert_eq!(layout.row_count(), 6);
        assert_eq!(layout.rows_of_line(1), 0..2);
        assert_eq!(layout.rows_of_line(2), 2..5);
        assert_eq!(layout.rows_of_line(3), 5..6);
        assert_eq!(layout.rows_of_line(4), 0..0);
    }

    #[test]
    fn test_row_of_wrapped_boundary_goes_to_next_row() {
        let buf = EditorBuffer::from_text("abcdefghij");
        let layout = Layout::build(&buf, 4, WrapMode::Char, 4);
        assert_eq!(layout.row_of(TextIndex::new(1, 3)), Some(0));
        assert_eq!(layout.row_of(TextIndex::new(1, 4)), Some(1));
        assert_eq!(layout.row_of(TextIndex::new(1, 10)), Some(2));
        assert_eq!(layout.row_of(TextIndex::new(2, 0)), None);
    }

    #[test]
    fn test_col_at_x_and_back() {
        let line = chars("a\tb");
        let row = DisplayRow { line: 1, start: 0, end: 3 };
        assert_eq!(col_at_x(&line, row, 0, true, 4), 0);
        assert_eq!(col_at_x(&line, row, 2, true, 4), 1);
        assert_eq!(col_at_x(&line, row, 4, true, 4), 2);
        assert_eq!(col_at_x(&line, row, 40, true, 4), 3);
        assert_eq!(x_of_col(&line, row, 2, 4), 4);
    }

    #[test]
    fn test_col_at_x_past_wrapped_row_stays_on_row() {
        let line = chars("abcdefgh");
        let row = DisplayRow { line: 1, start: 0, end: 4 };
        assert_eq!(col_at_x(&line, row, 10, false, 4), 3);
    }
}
