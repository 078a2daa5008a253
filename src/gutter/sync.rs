//! Line-number synchronization against a [`TextWidget`].

use tracing::debug;

use crate::editor::{Index, TextIndex, TextWidget};
use crate::error::{EditorError, Result};

use super::GutterSurface;

/// Structural edits the line-count strategy reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralEdit {
    NewlineInserted,
    LineRemoved,
}

/// Editing keys that may change the line structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Enter,
    Backspace,
    Delete,
}

/// Columns needed for the numbers `1..=n` plus one space of padding.
pub const fn label_width(n: usize) -> u16 {
    let mut digits = 1;
    let mut rest = n / 10;
    while rest > 0 {
        digits += 1;
        rest /= 10;
    }
    digits + 1
}

/// Redraw numbers for the display rows currently rendered.
///
/// Walks logical lines from the one at the top-left cell, drawing each
/// line's number at the row `dline_info` reports, until a line is not
/// rendered. Returns how many numbers were drawn. Missing geometry draws
/// nothing.
pub fn redraw_viewport<W, S>(widget: &mut W, surface: &mut S) -> Result<usize>
where
    W: TextWidget + ?Sized,
    S: GutterSurface + ?Sized,
{
    surface.clear();
    let mut index = match widget.index(Index::at(0, 0)) {
        Ok(index) => index,
        Err(EditorError::GeometryUnavailable) => {
            debug!("gutter redraw skipped: no geometry yet");
            return Ok(0);
        }
        Err(err) => return Err(err),
    };
    // The last insertable position is 1.0 only for an empty buffer.
    if widget.index(Index::End.chars(-1))? == TextIndex::START {
        surface.set_width(label_width(1));
        return Ok(0);
    }
    surface.set_width(label_width(widget.line_count()?));

    let mut drawn = 0;
    loop {
        let info = match widget.dline_info(Index::Pos(index)) {
            Ok(Some(info)) => info,
            Ok(None) => break,
            Err(EditorError::GeometryUnavailable) => return Ok(drawn),
            Err(err) => return Err(err),
        };
        surface.draw_at(info.y, &index.line.to_string());
        drawn += 1;
        let next = widget.index(Index::Pos(index).lines(1).line_start())?;
        if next.line <= index.line {
            break;
        }
        index = next;
    }
    Ok(drawn)
}

/// Rebuild the gutter text as `1..N`.
///
/// `edit` is the structural edit about to be applied; the count is
/// predicted from it since this runs before the key's own edit. Returns `N`.
pub fn sync_line_count<W, S>(
    widget: &mut W,
    surface: &mut S,
    edit: Option<StructuralEdit>,
) -> Result<usize>
where
    W: TextWidget + ?Sized,
    S: GutterSurface + ?Sized,
{
    let current = widget.index(Index::End)?.line - 1;
    let n = match edit {
        Some(StructuralEdit::NewlineInserted) => current + 1,
        Some(StructuralEdit::LineRemoved) => current.saturating_sub(1).max(1),
        None => current,
    };
    let text = (1..=n).map(|l| l.to_string()).collect::<Vec<_>>().join("\n");
    surface.set_text(&text);
    surface.set_width(label_width(n));
    Ok(n)
}

/// Whether pressing `key` now will add or remove a line.
///
/// Only looks at the cursor and selection, so a selection spanning several
/// lines still counts as a single removed line.
pub fn structural_edit<W: TextWidget + ?Sized>(
    widget: &mut W,
    key: EditKey,
) -> Result<Option<StructuralEdit>> {
    if key == EditKey::Enter {
        return Ok(Some(StructuralEdit::NewlineInserted));
    }
    if let Some((first, last)) = widget.selection()? {
        return Ok((first.line != last.line).then_some(StructuralEdit::LineRemoved));
    }
    let cursor = widget.cursor()?;
    let removes_line = match key {
        EditKey::Backspace => cursor.col == 0 && cursor.line > 1,
        EditKey::Delete => {
            let line_end = widget.index(Index::insert().line_end())?;
            cursor == line_end && cursor.line < widget.line_count()?
        }
        EditKey::Enter => false,
    };
    Ok(removes_line.then_some(StructuralEdit::LineRemoved))
}
