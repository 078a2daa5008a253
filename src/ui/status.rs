use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};

use super::style::NotebookStyle;

/// Cursor position of the active tab, e.g. `Ln 3, Col 1`.
pub fn status_text(model: &Model) -> String {
    model
        .cursor_position()
        .map_or_else(String::new, |(line, col)| format!("Ln {line}, Col {col}"))
}

pub fn render_status_bar(model: &Model, style: &NotebookStyle, frame: &mut Frame, area: Rect) {
    let position = status_text(model);
    let modified = if model.active_tab().is_some_and(crate::tabs::FileTab::is_modified) {
        "  [modified]"
    } else {
        ""
    };
    let bar = Paragraph::new(format!(" {position}{modified}"))
        .style(style.status())
        .alignment(Alignment::Left);
    frame.render_widget(bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
