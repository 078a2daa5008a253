use crate::editor::{Index, Motion, ScrollUnit, TextWidget};
use crate::gutter::EditKey;
use crate::tabs::TabId;

use super::model::{Model, NEW_FILE_TEXT, ToastLevel, UNTITLED, body_size};

/// Rows scrolled by one mouse wheel step.
pub const WHEEL_STEP: usize = 3;

/// All possible messages/events in the application.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // Editing
    /// Type a character, replacing the selection
    InsertChar(char),
    /// Tab key: spaces or a tab character
    InsertTab,
    /// Enter
    Newline,
    /// Delete the selection or the character before the cursor
    Backspace,
    /// Delete the selection or the character after the cursor
    DeleteForward,
    /// Paste the editor clipboard
    Paste,
    /// Paste text delivered by the terminal
    PasteText(String),
    Cut,
    Copy,
    SelectAll,
    Undo,
    Redo,

    // Cursor
    /// Move the cursor, collapsing the selection
    Move(Motion),
    /// Move the cursor, extending the selection
    Select(Motion),
    /// Put the cursor at a cell of the text area
    ClickText(u16, u16),

    // Scrolling
    PageUp,
    PageDown,
    ScrollUp(usize),
    ScrollDown(usize),
    /// Scrollbar click: show the text from this fraction on
    ScrollbarTo(f64),

    // Tabs
    NewTab,
    CloseTab,
    /// Close glyph of a tab label clicked
    CloseTabAt(usize),
    NextTab,
    PrevTab,
    SelectTab(usize),
    /// Deferred notification that a tab's text or view changed
    TextChanged(TabId),
    /// Write the active tab to disk
    Save,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// File and terminal side effects run afterwards in the event loop.
pub fn update(mut model: Model, msg: Message) -> Model {
    // Reset confirmation flags on any action other than the confirmed one.
    // Save preserves them so Ctrl+S can complete a pending quit or close.
    let bookkeeping = matches!(msg, Message::Save | Message::TextChanged(_) | Message::Redraw);
    if !bookkeeping && msg != Message::Quit {
        model.quit_confirmed = false;
    }
    if !bookkeeping && !matches!(msg, Message::CloseTab | Message::CloseTabAt(_)) {
        model.close_confirmed = None;
    }

    match msg {
        // Editing
        Message::InsertChar(c) => {
            model.with_active_widget(|w| w.type_char(c));
        }
        Message::InsertTab => {
            let text = model.config.tab_text();
            model.with_active_widget(|w| w.type_text(&text));
        }
        Message::Newline => {
            model.with_active_tab(|tab| {
                tab.before_key(EditKey::Enter)?;
                tab.widget().newline()
            });
        }
        Message::Backspace => {
            model.with_active_tab(|tab| {
                tab.before_key(EditKey::Backspace)?;
                tab.widget().backspace()
            });
        }
        Message::DeleteForward => {
            model.with_active_tab(|tab| {
                tab.before_key(EditKey::Delete)?;
                tab.widget().delete_forward()
            });
        }
        Message::Paste => {
            if let Some(text) = model.clipboard().map(str::to_owned) {
                model.with_active_widget(|w| w.paste(&text));
            }
        }
        Message::PasteText(text) => {
            model.with_active_widget(|w| w.paste(&text));
        }
        Message::Cut => {
            if let Some(Some(text)) = model.with_active_widget(TextWidget::cut) {
                model.set_clipboard(text);
            }
        }
        Message::Copy => {
            if let Some(Some(text)) = model.with_active_widget(TextWidget::copy) {
                model.set_clipboard(text);
            }
        }
        Message::SelectAll => {
            model.with_active_widget(TextWidget::select_all);
        }
        Message::Undo => {
            model.with_active_widget(TextWidget::undo);
        }
        Message::Redo => {
            model.with_active_widget(TextWidget::redo);
        }

        // Cursor
        Message::Move(motion) => {
            model.with_active_widget(|w| w.move_cursor(motion));
        }
        Message::Select(motion) => {
            model.with_active_widget(|w| w.extend_selection(motion));
        }
        Message::ClickText(x, y) => {
            model.with_active_widget(|w| w.move_to(Index::at(x, y)));
        }

        // Scrolling
        Message::PageUp => {
            model.with_active_widget(|w| w.page(-1));
        }
        Message::PageDown => {
            model.with_active_widget(|w| w.page(1));
        }
        Message::ScrollUp(n) => {
            let amount = -isize::try_from(n).unwrap_or(isize::MAX);
            model.with_active_widget(|w| w.yview_scroll(amount, ScrollUnit::Units));
        }
        Message::ScrollDown(n) => {
            let amount = isize::try_from(n).unwrap_or(isize::MAX);
            model.with_active_widget(|w| w.yview_scroll(amount, ScrollUnit::Units));
        }
        Message::ScrollbarTo(fraction) => {
            model.with_active_widget(|w| w.yview_moveto(fraction.clamp(0.0, 1.0)));
        }

        // Tabs
        Message::NewTab => {
            model.notebook.open_text(UNTITLED, NEW_FILE_TEXT);
        }
        Message::CloseTab => {
            if let Some(index) = model.notebook.active_index() {
                close_tab(&mut model, index, "Press Ctrl+W again");
            }
        }
        Message::CloseTabAt(index) => {
            let retry = format!("Click {} again", model.notebook.style().close_glyph);
            close_tab(&mut model, index, &retry);
        }
        Message::NextTab => {
            let result = model.notebook.select_next();
            model.report(result);
        }
        Message::PrevTab => {
            let result = model.notebook.select_prev();
            model.report(result);
        }
        Message::SelectTab(index) => {
            let result = model.notebook.select(index);
            model.report(result);
        }
        Message::TextChanged(id) => {
            // A tab closed since the change was queued has nothing to refresh.
            if let Some(tab) = model.notebook.tab_mut(id) {
                let result = tab.refresh();
                model.report(result);
            }
        }
        // Save: handled in effects (file write)
        // Redraw: no state change needed
        Message::Save | Message::Redraw => {}

        // Window
        Message::Resize(width, height) => {
            model.terminal_size = (width, height);
            let (body_width, body_height) = body_size(model.terminal_size);
            let result = model.notebook.set_body(body_width, body_height);
            model.report(result);
        }

        // Application
        Message::Quit => {
            if model.notebook.any_modified() && !model.quit_confirmed {
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Press Ctrl+Q again to quit, or Ctrl+S to save",
                );
                model.quit_confirmed = true;
            } else {
                model.should_quit = true;
            }
        }
    }
    model
}

/// Close the tab at `index`. A modified tab is only closed by a second
/// request for the same tab.
fn close_tab(model: &mut Model, index: usize, retry: &str) {
    let Some(tab) = model.notebook.tabs().get(index) else {
        return;
    };
    let id = tab.id();
    if tab.is_modified() && model.close_confirmed != Some(id) {
        model.show_toast(
            ToastLevel::Warning,
            format!("Unsaved changes! {retry} to close, or Ctrl+S to save"),
        );
        model.close_confirmed = Some(id);
        return;
    }
    model.close_confirmed = None;
    let result = model.notebook.close(index);
    model.report(result);
}
