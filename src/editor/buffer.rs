use ropey::Rope;

use super::index::TextIndex;

/// One recorded change, in rope character offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Edit {
    Insert { at: usize, text: String },
    Delete { at: usize, text: String },
}

impl Edit {
    const fn is_insert(&self) -> bool {
        matches!(self, Self::Insert { .. })
    }

    /// Whether `next` continues the typing or deleting run that `self` started.
    fn continues_with(&self, next: &Self) -> bool {
        match (self, next) {
            (Self::Insert { at, text }, Self::Insert { at: next_at, text: next_text }) => {
                *next_at == at + text.chars().count() && !next_text.contains('\n')
            }
            (Self::Delete { at, .. }, Self::Delete { at: next_at, text: next_text }) => {
                // Backspace runs move left, forward-delete runs stay put.
                *next_at + next_text.chars().count() == *at || next_at == at
            }
            _ => false,
        }
    }
}

/// Undo and redo stacks of edit groups.
#[derive(Debug, Default)]
struct History {
    undo: Vec<Vec<Edit>>,
    redo: Vec<Vec<Edit>>,
    group_open: bool,
}

impl History {
    fn record(&mut self, edit: Edit) {
        self.redo.clear();
        let extend = self.group_open
            && self
                .undo
                .last()
                .and_then(|group| group.last())
                .is_some_and(|last| last.is_insert() == edit.is_insert() && last.continues_with(&edit));
        if extend {
            if let Some(group) = self.undo.last_mut() {
                group.push(edit);
            }
        } else {
            self.undo.push(vec![edit]);
            self.group_open = true;
        }
    }

    /// Append to the open group regardless of kind.
    fn record_joined(&mut self, edit: Edit) {
        self.redo.clear();
        match self.undo.last_mut() {
            Some(group) if self.group_open => group.push(edit),
            _ => {
                self.undo.push(vec![edit]);
                self.group_open = true;
            }
        }
    }

    const fn separate(&mut self) {
        self.group_open = false;
    }
}

/// A text buffer backed by a rope data structure.
///
/// Positions are [`TextIndex`] values: one-based lines and zero-based
/// character columns. Every edit is recorded for undo, grouped so that a run
/// of typing or deleting undoes in one step.
pub struct EditorBuffer {
    rope: Rope,
    history: History,
    dirty: bool,
    crlf: bool,
}

impl EditorBuffer {
    /// Create a new buffer from a string.
    ///
    /// `\r\n` line endings are normalized to `\n`; [`EditorBuffer::text_for_disk`]
    /// restores them.
    pub fn from_text(text: &str) -> Self {
        let crlf = text.contains("\r\n");
        let rope = if crlf {
            Rope::from_str(&text.replace("\r\n", "\n"))
        } else {
            Rope::from_str(text)
        };
        Self {
            rope,
            history: History::default(),
            dirty: false,
            crlf,
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// Whether the buffer has been modified since creation or last save.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub const fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }

    /// Whether the buffer holds no characters at all.
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get the content of a line (without trailing newline).
    pub fn line_at(&self, line: usize) -> Option<String> {
        if line == 0 || line > self.line_count() {
            return None;
        }
        let s = self.rope.line(line - 1).to_string();
        Some(s.trim_end_matches('\n').to_string())
    }

    /// Length of a line in characters (without trailing newline).
    pub fn line_len(&self, line: usize) -> usize {
        if line == 0 || line > self.line_count() {
            return 0;
        }
        let slice = self.rope.line(line - 1);
        let len = slice.len_chars();
        if len > 0 && slice.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// The content with the line endings it was loaded with.
    pub fn text_for_disk(&self) -> String {
        let text = self.text();
        if self.crlf {
            text.replace('\n', "\r\n")
        } else {
            text
        }
    }

    /// The `end` position: the start of the line after the last one.
    pub fn end_index(&self) -> TextIndex {
        TextIndex::new(self.line_count() + 1, 0)
    }

    /// The last position a character can be inserted at.
    pub fn last_index(&self) -> TextIndex {
        let line = self.line_count();
        TextIndex::new(line, self.line_len(line))
    }

    /// Clamp a position onto existing text.
    pub fn clamp(&self, idx: TextIndex) -> TextIndex {
        if idx.line > self.line_count() {
            return self.last_index();
        }
        let line = idx.line.max(1);
        TextIndex::new(line, idx.col.min(self.line_len(line)))
    }

    /// Move a position by `n` characters, counting each line break as one.
    pub fn offset_chars(&self, idx: TextIndex, n: isize) -> TextIndex {
        let char_idx = self.char_of(idx);
        let target = char_idx
            .saturating_add_signed(n)
            .min(self.rope.len_chars());
        self.index_at_char(target)
    }

    /// Text between two positions, in either order.
    pub fn slice(&self, a: TextIndex, b: TextIndex) -> String {
        let (start, end) = ordered(self.char_of(a), self.char_of(b));
        self.rope.slice(start..end).to_string()
    }

    /// Insert text at a position, returning the position after it.
    pub fn insert(&mut self, at: TextIndex, text: &str) -> TextIndex {
        self.insert_inner(at, text, false)
    }

    /// Replace the text between two positions as a single undo step.
    pub fn replace(&mut self, a: TextIndex, b: TextIndex, text: &str) -> TextIndex {
        let start = if a <= b { a } else { b };
        let start = self.clamp(start);
        self.history.separate();
        let removed = self.delete(a, b);
        self.insert_inner(start, text, !removed.is_empty())
    }

    fn insert_inner(&mut self, at: TextIndex, text: &str, joined: bool) -> TextIndex {
        let at = self.char_of(at);
        if text.is_empty() {
            return self.index_at_char(at);
        }
        let text = text.replace("\r\n", "\n");
        self.rope.insert(at, &text);
        let end = at + text.chars().count();
        let edit = Edit::Insert { at, text };
        if joined {
            self.history.record_joined(edit);
        } else {
            self.history.record(edit);
        }
        self.dirty = true;
        self.index_at_char(end)
    }

    /// Delete the text between two positions, returning what was removed.
    pub fn delete(&mut self, a: TextIndex, b: TextIndex) -> String {
        let (start, end) = ordered(self.char_of(a), self.char_of(b));
        if start == end {
            return String::new();
        }
        let text = self.rope.slice(start..end).to_string();
        self.rope.remove(start..end);
        self.history.record(Edit::Delete {
            at: start,
            text: text.clone(),
        });
        self.dirty = true;
        text
    }

    /// Close the current undo group.
    pub const fn separate_edits(&mut self) {
        self.history.separate();
    }

    /// Revert the most recent edit group.
    ///
    /// Returns where the cursor belongs afterwards, or `None` when there is
    /// nothing to undo.
    pub fn undo(&mut self) -> Option<TextIndex> {
        self.history.separate();
        let group = self.history.undo.pop()?;
        let mut cursor = 0;
        for edit in group.iter().rev() {
            cursor = match edit {
                Edit::Insert { at, text } => {
                    self.rope.remove(*at..at + text.chars().count());
                    *at
                }
                Edit::Delete { at, text } => {
                    self.rope.insert(*at, text);
                    at + text.chars().count()
                }
            };
        }
        self.history.redo.push(group);
        self.dirty = true;
        Some(self.index_at_char(cursor))
    }

    /// Reapply the most recently undone edit group.
    pub fn redo(&mut self) -> Option<TextIndex> {
        self.history.separate();
        let group = self.history.redo.pop()?;
        let mut cursor = 0;
        for edit in &group {
            cursor = match edit {
                Edit::Insert { at, text } => {
                    self.rope.insert(*at, text);
                    at + text.chars().count()
                }
                Edit::Delete { at, text } => {
                    self.rope.remove(*at..at + text.chars().count());
                    *at
                }
            };
        }
        self.history.undo.push(group);
        self.dirty = true;
        Some(self.index_at_char(cursor))
    }

    /// Start of the word left of `idx` (Ctrl+Left).
    pub fn word_left(&self, idx: TextIndex) -> TextIndex {
        let idx = self.clamp(idx);
        if idx.col == 0 {
            if idx.line > 1 {
                return TextIndex::new(idx.line - 1, self.line_len(idx.line - 1));
            }
            return idx;
        }

        let line: Vec<char> = self.line_at(idx.line).unwrap_or_default().chars().collect();
        let mut col = idx.col;
        while col > 0 && !is_word_char(line[col - 1]) {
            col -= 1;
        }
        while col > 0 && is_word_char(line[col - 1]) {
            col -= 1;
        }
        TextIndex::new(idx.line, col)
    }

    /// Start of the next word right of `idx` (Ctrl+Right).
    pub fn word_right(&self, idx: TextIndex) -> TextIndex {
        let idx = self.clamp(idx);
        let len = self.line_len(idx.line);
        if idx.col >= len {
            if idx.line < self.line_count() {
                return TextIndex::new(idx.line + 1, 0);
            }
            return idx;
        }

        let line: Vec<char> = self.line_at(idx.line).unwrap_or_default().chars().collect();
        let mut col = idx.col;
        // Skip current word characters
        while col < len && is_word_char(line[col]) {
            col += 1;
        }
        // Skip whitespace/punctuation after word
        while col < len && !is_word_char(line[col]) {
            col += 1;
        }
        TextIndex::new(idx.line, col)
    }

    /// Total characters, counting line breaks.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Convert a position to a ropey char index, clamping it first.
    pub fn char_of(&self, idx: TextIndex) -> usize {
        let idx = self.clamp(idx);
        self.rope.line_to_char(idx.line - 1) + idx.col
    }

    /// Convert a ropey char index back to a position.
    pub fn index_at_char(&self, char_idx: usize) -> TextIndex {
        let char_idx = char_idx.min(self.rope.len_chars());
        let line = self.rope.char_to_line(char_idx);
        let col = char_idx - self.rope.line_to_char(line);
        TextIndex::new(line + 1, col)
    }
}

const fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a <= b { (a, b) } else { (b, a) }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("dirty", &self.dirty)
            .field("crlf", &self.crlf)
            .finish_non_exhaustive()
    }
}
