//! The text widget command surface.
//!
//! Every interaction with a text area, whether it comes from a key binding,
//! the gutter or the tab container, is a [`Command`] passed through
//! [`TextWidget::execute`]. The provided methods on the trait are thin
//! wrappers that build commands, so a wrapper that implements only
//! `execute` sees every primitive operation the bindings perform.

use crate::error::{EditorError, Result};

use super::index::{Index, Mark, TextIndex};

/// Unit for `xview`/`yview` scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollUnit {
    /// Rows vertically, cells horizontally.
    Units,
    /// A screenful.
    Pages,
}

/// A view query or adjustment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewCommand {
    /// Report the visible fractions.
    Query,
    /// Show the content at this fraction at the top (or left) edge.
    MoveTo(f64),
    /// Scroll by a signed amount.
    Scroll(isize, ScrollUnit),
}

/// Tags the widget understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Sel,
}

/// Geometry of the display row holding an index, relative to the text area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DLineInfo {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

/// A primitive widget operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Insert { index: Index, text: String },
    /// Delete `start..end`, or the single character at `start`.
    Delete { start: Index, end: Option<Index> },
    Replace { start: Index, end: Index, text: String },
    MarkSet { mark: Mark, index: Index },
    Index(Index),
    /// Text of `start..end`, or the single character at `start`.
    Get { start: Index, end: Option<Index> },
    DLineInfo(Index),
    XView(ViewCommand),
    YView(ViewCommand),
    See(Index),
    TagAdd { tag: Tag, start: Index, end: Index },
    TagRemove { tag: Tag, start: Index, end: Index },
    TagRanges(Tag),
    EditUndo,
    EditRedo,
    EditSeparator,
    /// Query the modified flag, or set it.
    EditModified(Option<bool>),
}

/// The name of a command, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Insert,
    Delete,
    Replace,
    Mark,
    Index,
    Get,
    DLineInfo,
    XView,
    YView,
    See,
    Tag,
    Edit,
}

impl CommandKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Delete => "delete",
            Self::Replace => "replace",
            Self::Mark => "mark",
            Self::Index => "index",
            Self::Get => "get",
            Self::DLineInfo => "dlineinfo",
            Self::XView => "xview",
            Self::YView => "yview",
            Self::See => "see",
            Self::Tag => "tag",
            Self::Edit => "edit",
        }
    }
}

impl Command {
    pub const fn kind(&self) -> CommandKind {
        match self {
            Self::Insert { .. } => CommandKind::Insert,
            Self::Delete { .. } => CommandKind::Delete,
            Self::Replace { .. } => CommandKind::Replace,
            Self::MarkSet { .. } => CommandKind::Mark,
            Self::Index(_) => CommandKind::Index,
            Self::Get { .. } => CommandKind::Get,
            Self::DLineInfo(_) => CommandKind::DLineInfo,
            Self::XView(_) => CommandKind::XView,
            Self::YView(_) => CommandKind::YView,
            Self::See(_) => CommandKind::See,
            Self::TagAdd { .. } | Self::TagRemove { .. } | Self::TagRanges(_) => CommandKind::Tag,
            Self::EditUndo | Self::EditRedo | Self::EditSeparator | Self::EditModified(_) => {
                CommandKind::Edit
            }
        }
    }
}

/// What a command produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Unit,
    Index(TextIndex),
    Text(String),
    DLine(Option<DLineInfo>),
    View(f64, f64),
    Range(Option<(TextIndex, TextIndex)>),
    Flag(bool),
}

/// Cursor motions used by the key bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    WordLeft,
    WordRight,
    BufferStart,
    BufferEnd,
}

impl Motion {
    /// The index expression this motion moves the cursor to.
    pub fn target(self) -> Index {
        let insert = Index::insert();
        match self {
            Self::Left => insert.chars(-1),
            Self::Right => insert.chars(1),
            Self::Up => insert.display_lines(-1),
            Self::Down => insert.display_lines(1),
            Self::LineStart => insert.line_start(),
            Self::LineEnd => insert.line_end(),
            Self::WordLeft => insert.word_left(),
            Self::WordRight => insert.word_right(),
            Self::BufferStart => Index::Pos(TextIndex::START),
            Self::BufferEnd => Index::End,
        }
    }
}

/// A scrollable, editable text area driven by [`Command`]s.
pub trait TextWidget {
    /// Run one primitive operation.
    fn execute(&mut self, command: Command) -> Result<Reply>;

    fn insert(&mut self, index: Index, text: &str) -> Result<()> {
        self.execute(Command::Insert {
            index,
            text: text.to_string(),
        })
        .map(drop)
    }

    fn delete(&mut self, start: Index, end: Option<Index>) -> Result<()> {
        self.execute(Command::Delete { start, end }).map(drop)
    }

    fn replace(&mut self, start: Index, end: Index, text: &str) -> Result<()> {
        self.execute(Command::Replace {
            start,
            end,
            text: text.to_string(),
        })
        .map(drop)
    }

    fn mark_set(&mut self, mark: Mark, index: Index) -> Result<()> {
        self.execute(Command::MarkSet { mark, index }).map(drop)
    }

    fn index(&mut self, index: Index) -> Result<TextIndex> {
        match self.execute(Command::Index(index))? {
            Reply::Index(idx) => Ok(idx),
            _ => Err(EditorError::UnexpectedReply(CommandKind::Index.name())),
        }
    }

    fn get(&mut self, start: Index, end: Option<Index>) -> Result<String> {
        match self.execute(Command::Get { start, end })? {
            Reply::Text(text) => Ok(text),
            // A swallowed failure leaves nothing to return.
            Reply::Unit => Ok(String::new()),
            _ => Err(EditorError::UnexpectedReply(CommandKind::Get.name())),
        }
    }

    fn dline_info(&mut self, index: Index) -> Result<Option<DLineInfo>> {
        match self.execute(Command::DLineInfo(index))? {
            Reply::DLine(info) => Ok(info),
            _ => Err(EditorError::UnexpectedReply(CommandKind::DLineInfo.name())),
        }
    }

    fn see(&mut self, index: Index) -> Result<()> {
        self.execute(Command::See(index)).map(drop)
    }

    fn yview(&mut self) -> Result<(f64, f64)> {
        match self.execute(Command::YView(ViewCommand::Query))? {
            Reply::View(top, bottom) => Ok((top, bottom)),
            _ => Err(EditorError::UnexpectedReply(CommandKind::YView.name())),
        }
    }

    fn yview_moveto(&mut self, fraction: f64) -> Result<()> {
        self.execute(Command::YView(ViewCommand::MoveTo(fraction)))
            .map(drop)
    }

    fn yview_scroll(&mut self, amount: isize, unit: ScrollUnit) -> Result<()> {
        self.execute(Command::YView(ViewCommand::Scroll(amount, unit)))
            .map(drop)
    }

    fn xview(&mut self) -> Result<(f64, f64)> {
        match self.execute(Command::XView(ViewCommand::Query))? {
            Reply::View(left, right) => Ok((left, right)),
            _ => Err(EditorError::UnexpectedReply(CommandKind::XView.name())),
        }
    }

    fn xview_moveto(&mut self, fraction: f64) -> Result<()> {
        self.execute(Command::XView(ViewCommand::MoveTo(fraction)))
            .map(drop)
    }

    fn xview_scroll(&mut self, amount: isize, unit: ScrollUnit) -> Result<()> {
        self.execute(Command::XView(ViewCommand::Scroll(amount, unit)))
            .map(drop)
    }

    fn edit_separator(&mut self) -> Result<()> {
        self.execute(Command::EditSeparator).map(drop)
    }

    fn is_modified(&mut self) -> Result<bool> {
        match self.execute(Command::EditModified(None))? {
            Reply::Flag(flag) => Ok(flag),
            _ => Err(EditorError::UnexpectedReply(CommandKind::Edit.name())),
        }
    }

    fn set_modified(&mut self, modified: bool) -> Result<()> {
        self.execute(Command::EditModified(Some(modified)))
            .map(drop)
    }

    /// Number of logical lines; an empty buffer has one.
    fn line_count(&mut self) -> Result<usize> {
        Ok(self.index(Index::End)?.line - 1)
    }

    fn cursor(&mut self) -> Result<TextIndex> {
        self.index(Index::insert())
    }

    fn selection(&mut self) -> Result<Option<(TextIndex, TextIndex)>> {
        match self.execute(Command::TagRanges(Tag::Sel))? {
            Reply::Range(range) => Ok(range),
            _ => Err(EditorError::UnexpectedReply(CommandKind::Tag.name())),
        }
    }

    fn has_selection(&mut self) -> Result<bool> {
        Ok(self.selection()?.is_some())
    }

    fn clear_selection(&mut self) -> Result<()> {
        self.execute(Command::TagRemove {
            tag: Tag::Sel,
            start: Index::Pos(TextIndex::START),
            end: Index::End,
        })
        .map(drop)
    }

    fn select_all(&mut self) -> Result<()> {
        self.execute(Command::TagAdd {
            tag: Tag::Sel,
            start: Index::Pos(TextIndex::START),
            end: Index::End,
        })
        .map(drop)
    }

    // --- Bindings ---

    /// The selected text, or `None` when the selection is empty.
    ///
    /// Issued unconditionally; with no selection the underlying `get`
    /// fails with [`EditorError::NoSelection`].
    fn copy(&mut self) -> Result<Option<String>> {
        let text = self.get(Index::SelFirst, Some(Index::SelLast))?;
        Ok((!text.is_empty()).then_some(text))
    }

    /// Copy the selection, then delete it.
    fn cut(&mut self) -> Result<Option<String>> {
        let Some(text) = self.copy()? else {
            return Ok(None);
        };
        self.delete(Index::SelFirst, Some(Index::SelLast))?;
        self.see(Index::insert())?;
        Ok(Some(text))
    }

    /// Insert text at the cursor, replacing any selection.
    fn type_text(&mut self, text: &str) -> Result<()> {
        if self.has_selection()? {
            self.delete(Index::SelFirst, Some(Index::SelLast))?;
        }
        self.insert(Index::insert(), text)?;
        self.see(Index::insert())
    }

    fn type_char(&mut self, c: char) -> Result<()> {
        let mut buf = [0; 4];
        self.type_text(c.encode_utf8(&mut buf))
    }

    fn newline(&mut self) -> Result<()> {
        self.type_text("\n")
    }

    fn paste(&mut self, text: &str) -> Result<()> {
        self.edit_separator()?;
        self.type_text(text)?;
        self.edit_separator()
    }

    /// Delete the selection, or the character before the cursor.
    fn backspace(&mut self) -> Result<()> {
        if self.has_selection()? {
            self.delete(Index::SelFirst, Some(Index::SelLast))?;
        } else {
            self.delete(Index::insert().chars(-1), Some(Index::insert()))?;
        }
        self.see(Index::insert())
    }

    /// Delete the selection, or the character after the cursor.
    fn delete_forward(&mut self) -> Result<()> {
        if self.has_selection()? {
            self.delete(Index::SelFirst, Some(Index::SelLast))?;
        } else {
            self.delete(Index::insert(), None)?;
        }
        self.see(Index::insert())
    }

    fn move_cursor(&mut self, motion: Motion) -> Result<()> {
        self.move_to(motion.target())
    }

    /// Collapse the selection and put the cursor at `index`.
    fn move_to(&mut self, index: Index) -> Result<()> {
        self.clear_selection()?;
        self.mark_set(Mark::Insert, index)?;
        self.see(Index::insert())
    }

    /// Move the cursor while growing the selection from its anchor.
    fn extend_selection(&mut self, motion: Motion) -> Result<()> {
        if !self.has_selection()? {
            self.mark_set(Mark::Anchor, Index::insert())?;
        }
        self.mark_set(Mark::Insert, motion.target())?;
        self.clear_selection()?;
        self.execute(Command::TagAdd {
            tag: Tag::Sel,
            start: Index::Mark(Mark::Anchor),
            end: Index::insert(),
        })?;
        self.see(Index::insert())
    }

    /// Scroll a page and keep the cursor on screen.
    fn page(&mut self, pages: isize) -> Result<()> {
        self.yview_scroll(pages, ScrollUnit::Pages)?;
        if self.dline_info(Index::insert())?.is_none() {
            self.clear_selection()?;
            self.mark_set(Mark::Insert, Index::at(0, 0))?;
        }
        Ok(())
    }

    fn undo(&mut self) -> Result<()> {
        if let Reply::Index(pos) = self.execute(Command::EditUndo)? {
            self.clear_selection()?;
            self.mark_set(Mark::Insert, Index::Pos(pos))?;
            self.see(Index::insert())?;
        }
        Ok(())
    }

    fn redo(&mut self) -> Result<()> {
        if let Reply::Index(pos) = self.execute(Command::EditRedo)? {
            self.clear_selection()?;
            self.mark_set(Mark::Insert, Index::Pos(pos))?;
            self.see(Index::insert())?;
        }
        Ok(())
    }
}
