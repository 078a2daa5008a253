//! Text positions and index expressions.
//!
//! A [`TextIndex`] is a concrete `line.column` position: lines count from 1,
//! columns count characters from 0. An [`Index`] is an expression that a
//! [`TextWidget`](super::TextWidget) resolves to a `TextIndex`, such as
//! `insert`, `end`, `@0,0` or `3.4 +1lines linestart`.

use std::fmt;
use std::str::FromStr;

use crate::error::EditorError;

/// A resolved position in a text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextIndex {
    /// One-based line number.
    pub line: usize,
    /// Zero-based character column.
    pub col: usize,
}

impl TextIndex {
    /// The first position of any buffer, `1.0`.
    pub const START: Self = Self { line: 1, col: 0 };

    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl fmt::Display for TextIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.line, self.col)
    }
}

impl FromStr for TextIndex {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EditorError::InvalidIndex(s.to_string());
        let (line, col) = s.trim().split_once('.').ok_or_else(invalid)?;
        let line: usize = line.parse().map_err(|_| invalid())?;
        let col: usize = col.parse().map_err(|_| invalid())?;
        Ok(Self::new(line.max(1), col))
    }
}

/// Named marks tracked by a text widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    /// The insertion cursor.
    Insert,
    /// The fixed end of a keyboard selection.
    Anchor,
}

impl Mark {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Anchor => "anchor",
        }
    }
}

/// An index expression, resolved by the widget at call time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Index {
    /// A literal position.
    Pos(TextIndex),
    /// The position of a mark.
    Mark(Mark),
    /// One past the last character: `(line_count + 1).0`.
    End,
    /// The character under a cell of the text area, relative to its top-left.
    At { x: u16, y: u16 },
    /// First selected character.
    SelFirst,
    /// One past the last selected character.
    SelLast,
    /// Move by a number of characters, crossing line boundaries.
    Chars(Box<Index>, isize),
    /// Move by a number of logical lines, keeping the column.
    Lines(Box<Index>, isize),
    /// Move by a number of display rows, keeping the screen column.
    DisplayLines(Box<Index>, isize),
    /// Start of the line holding the base index.
    LineStart(Box<Index>),
    /// End of the line holding the base index.
    LineEnd(Box<Index>),
    /// Start of the word before the base index.
    WordLeft(Box<Index>),
    /// Start of the word after the base index.
    WordRight(Box<Index>),
}

impl Index {
    pub const fn insert() -> Self {
        Self::Mark(Mark::Insert)
    }

    pub const fn at(x: u16, y: u16) -> Self {
        Self::At { x, y }
    }

    pub const fn pos(line: usize, col: usize) -> Self {
        Self::Pos(TextIndex::new(line, col))
    }

    #[must_use]
    pub fn chars(self, n: isize) -> Self {
        Self::Chars(Box::new(self), n)
    }

    #[must_use]
    pub fn lines(self, n: isize) -> Self {
        Self::Lines(Box::new(self), n)
    }

    #[must_use]
    pub fn display_lines(self, n: isize) -> Self {
        Self::DisplayLines(Box::new(self), n)
    }

    #[must_use]
    pub fn line_start(self) -> Self {
        Self::LineStart(Box::new(self))
    }

    #[must_use]
    pub fn line_end(self) -> Self {
        Self::LineEnd(Box::new(self))
    }

    #[must_use]
    pub fn word_left(self) -> Self {
        Self::WordLeft(Box::new(self))
    }

    #[must_use]
    pub fn word_right(self) -> Self {
        Self::WordRight(Box::new(self))
    }
}

impl From<TextIndex> for Index {
    fn from(idx: TextIndex) -> Self {
        Self::Pos(idx)
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pos(idx) => write!(f, "{idx}"),
            Self::Mark(mark) => f.write_str(mark.name()),
            Self::End => f.write_str("end"),
            Self::At { x, y } => write!(f, "@{x},{y}"),
            Self::SelFirst => f.write_str("sel.first"),
            Self::SelLast => f.write_str("sel.last"),
            Self::Chars(base, n) => write!(f, "{base} {n:+}c"),
            Self::Lines(base, n) => write!(f, "{base} {n:+}lines"),
            Self::LineStart(base) => write!(f, "{base} linestart"),
            Self::DisplayLines(base, n) => write!(f, "{base} {n:+}displaylines"),
            Self::LineEnd(base) => write!(f, "{base} lineend"),
            Self::WordLeft(base) => write!(f, "{base} wordleft"),
            Self::WordRight(base) => write!(f, "{base} wordright"),
        }
    }
}

impl FromStr for Index {
    type Err = EditorError;

    /// Parse expressions such as `insert -1c`, `@0,0`, `end` or
    /// `4.2 +1lines linestart`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EditorError::InvalidIndex(s.to_string());
        let trimmed = s.trim();
        let base_end = trimmed
            .find(|c: char| c == '+' || c == '-' || c.is_whitespace())
            .unwrap_or(trimmed.len());
        let (base, mut rest) = trimmed.split_at(base_end);

        let mut index = match base {
            "insert" => Self::insert(),
            "anchor" => Self::Mark(Mark::Anchor),
            "end" => Self::End,
            "sel.first" => Self::SelFirst,
            "sel.last" => Self::SelLast,
            _ if base.starts_with('@') => {
                let (x, y) = base[1..].split_once(',').ok_or_else(invalid)?;
                Self::At {
                    x: x.parse().map_err(|_| invalid())?,
                    y: y.parse().map_err(|_| invalid())?,
                }
            }
            _ => Self::Pos(base.parse().map_err(|_| invalid())?),
        };

        loop {
            rest = rest.trim_start();
            if rest.is_empty() {
                break;
            }
            if let Some(after) = rest.strip_prefix("linestart") {
                index = index.line_start();
                rest = after;
                continue;
            }
            if let Some(after) = rest.strip_prefix("lineend") {
                index = index.line_end();
                rest = after;
                continue;
            }
            if let Some(after) = rest.strip_prefix("wordleft") {
                index = index.word_left();
                rest = after;
                continue;
            }
            if let Some(after) = rest.strip_prefix("wordright") {
                index = index.word_right();
                rest = after;
                continue;
            }

            let sign: isize = match rest.as_bytes()[0] {
                b'+' => 1,
                b'-' => -1,
                _ => return Err(invalid()),
            };
            rest = rest[1..].trim_start();
            let digits_end = rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len());
            let count: isize = rest[..digits_end].parse().map_err(|_| invalid())?;
            rest = rest[digits_end..].trim_start();
            let unit_end = rest
                .find(|c: char| !c.is_ascii_alphabetic())
                .unwrap_or(rest.len());
            index = match &rest[..unit_end] {
                "c" | "ch" | "char" | "chars" => index.chars(sign * count),
                "l" | "line" | "lines" => index.lines(sign * count),
                "displayline" | "displaylines" => index.display_lines(sign * count),
                _ => return Err(invalid()),
            };
            rest = &rest[unit_end..];
        }

        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_index_display_and_parse() {
        let idx = TextIndex::new(3, 7);
        assert_eq!(idx.to_string(), "3.7");
        assert_eq!("3.7".parse::<TextIndex>().unwrap(), idx);
    }

    #[test]
    fn test_text_index_orders_by_line_then_col() {
        assert!(TextIndex::new(1, 9) < TextIndex::new(2, 0));
        assert!(TextIndex::new(2, 1) > TextIndex::new(2, 0));
    }

    #[test]
    fn test_text_index_line_zero_clamps_to_one() {
        assert_eq!("0.4".parse::<TextIndex>().unwrap(), TextIndex::new(1, 4));
    }

    #[test]
    fn test_parse_named_bases() {
        assert_eq!("insert".parse::<Index>().unwrap(), Index::insert());
        assert_eq!("end".parse::<Index>().unwrap(), Index::End);
        assert_eq!("sel.first".parse::<Index>().unwrap(), Index::SelFirst);
        assert_eq!("sel.last".parse::<Index>().unwrap(), Index::SelLast);
        assert_eq!("@0,0".parse::<Index>().unwrap(), Index::at(0, 0));
    }

    #[test]
    fn test_parse_modifiers_chain() {
        let parsed: Index = "4.2 +1lines linestart".parse().unwrap();
        assert_eq!(parsed, Index::pos(4, 2).lines(1).line_start());

        let parsed: Index = "insert-1c".parse().unwrap();
        assert_eq!(parsed, Index::insert().chars(-1));

        let parsed: Index = "end - 2 chars lineend".parse().unwrap();
        assert_eq!(parsed, Index::End.chars(-2).line_end());
    }

    #[test]
    fn test_parse_display_and_word_motions() {
        let parsed: Index = "insert +1displaylines".parse().unwrap();
        assert_eq!(parsed, Index::insert().display_lines(1));
        let parsed: Index = "insert wordleft".parse().unwrap();
        assert_eq!(parsed, Index::insert().word_left());
        assert_eq!(
            Index::insert().display_lines(-2).word_right().to_string(),
            "insert -2displaylines wordright"
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Index>().is_err());
        assert!("insert +1 bogus".parse::<Index>().is_err());
        assert!("@1".parse::<Index>().is_err());
        assert!("1.x".parse::<Index>().is_err());
    }

    #[test]
    fn test_display_matches_parse() {
        let idx = Index::pos(2, 0).lines(-1).line_end();
        let shown = idx.to_string();
        assert_eq!(shown.parse::<Index>().unwrap(), idx);
    }
}
