use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::app::{App, Message, Model, WHEEL_STEP};
use crate::editor::Motion;
use crate::ui::{ScreenAreas, TabHit, contains, tab_at_column};

use super::event_loop::ResizeDebouncer;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Paste(text) => Some(Message::PasteText(text.clone())),
            Event::Resize(w, h) => {
                crate::perf::log_event("event.resize.queue", format!("width={w} height={h}"));
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent) -> Option<Message> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        if let Some(motion) = motion_for(key.code, ctrl) {
            return Some(if shift {
                Message::Select(motion)
            } else {
                Message::Move(motion)
            });
        }

        match key.code {
            // Tabs
            KeyCode::PageUp if ctrl => Some(Message::PrevTab),
            KeyCode::PageDown if ctrl => Some(Message::NextTab),
            KeyCode::Tab if ctrl => Some(Message::NextTab),
            KeyCode::BackTab if ctrl => Some(Message::PrevTab),
            KeyCode::Char('n') if ctrl => Some(Message::NewTab),
            KeyCode::Char('w') if ctrl => Some(Message::CloseTab),

            // Clipboard and history
            KeyCode::Char('a') if ctrl => Some(Message::SelectAll),
            KeyCode::Char('c') if ctrl => Some(Message::Copy),
            KeyCode::Char('x') if ctrl => Some(Message::Cut),
            KeyCode::Char('v') if ctrl => Some(Message::Paste),
            KeyCode::Char('z') if ctrl => Some(Message::Undo),
            KeyCode::Char('y') if ctrl => Some(Message::Redo),

            // File
            KeyCode::Char('s') if ctrl => Some(Message::Save),
            KeyCode::Char('q') if ctrl => Some(Message::Quit),

            // Scrolling
            KeyCode::PageUp => Some(Message::PageUp),
            KeyCode::PageDown => Some(Message::PageDown),

            // Editing
            KeyCode::Enter => Some(Message::Newline),
            KeyCode::Tab => Some(Message::InsertTab),
            KeyCode::Backspace => Some(Message::Backspace),
            KeyCode::Delete => Some(Message::DeleteForward),
            KeyCode::Char(c) if !ctrl && !alt => Some(Message::InsertChar(c)),

            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        let (width, height) = model.terminal_size;
        let areas = ScreenAreas::for_notebook(Rect::new(0, 0, width, height), &model.notebook);
        let (x, y) = (mouse.column, mouse.row);
        let in_body = y >= areas.text.y && y < areas.text.y + areas.text.height;

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if contains(areas.tabs, x, y) {
                    return tab_at_column(&model.notebook, x).map(|hit| match hit {
                        TabHit::Title(index) => Message::SelectTab(index),
                        TabHit::Close(index) => Message::CloseTabAt(index),
                    });
                }
                if contains(areas.text, x, y) {
                    return Some(Message::ClickText(x - areas.text.x, y - areas.text.y));
                }
                if contains(areas.scrollbar, x, y) {
                    let fraction =
                        f64::from(y - areas.scrollbar.y) / f64::from(areas.scrollbar.height);
                    return Some(Message::ScrollbarTo(fraction));
                }
                None
            }
            MouseEventKind::ScrollDown if in_body => Some(Message::ScrollDown(WHEEL_STEP)),
            MouseEventKind::ScrollUp if in_body => Some(Message::ScrollUp(WHEEL_STEP)),
            _ => None,
        }
    }
}

fn motion_for(code: KeyCode, ctrl: bool) -> Option<Motion> {
    let motion = match (code, ctrl) {
        (KeyCode::Left, false) => Motion::Left,
        (KeyCode::Right, false) => Motion::Right,
        (KeyCode::Left, true) => Motion::WordLeft,
        (KeyCode::Right, true) => Motion::WordRight,
        (KeyCode::Up, _) => Motion::Up,
        (KeyCode::Down, _) => Motion::Down,
        (KeyCode::Home, false) => Motion::LineStart,
        (KeyCode::End, false) => Motion::LineEnd,
        (KeyCode::Home, true) => Motion::BufferStart,
        (KeyCode::End, true) => Motion::BufferEnd,
        _ => return None,
    };
    Some(motion)
}
